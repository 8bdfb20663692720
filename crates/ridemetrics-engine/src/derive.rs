//! Per-row derived fields

use ridemetrics_types::{FieldLookup, SchemaError, Value};

use crate::definition::{Derivation, DerivedField};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Compute the exact value of one derived field for a row
///
/// NULL operands produce NULL. `record_index` is only used for error
/// reporting. The field's rounding is not applied here: later derived fields
/// and classification rules read the exact value, and [`round_derived`]
/// produces the emitted one.
pub fn evaluate_derived<R: FieldLookup>(
    row: &R,
    field: &DerivedField,
    record_index: usize,
) -> Result<Value, SchemaError> {
    let get = |name: &str| operand(row, name, record_index);

    Ok(match &field.derivation {
        Derivation::Difference { left, right } => {
            let (lv, rv) = (get(left)?, get(right)?);
            match (numeric(lv, left, record_index)?, numeric(rv, right, record_index)?) {
                (Some(l), Some(r)) => difference(lv, rv, l, r),
                _ => Value::Null,
            }
        }
        Derivation::PercentChange { current, baseline } => {
            let c = numeric(get(current)?, current, record_index)?;
            let b = numeric(get(baseline)?, baseline, record_index)?;
            match (c, b) {
                // NULLIF(baseline, 0)
                (Some(c), Some(b)) if b != 0.0 => Value::Numeric((c - b) / b * 100.0),
                _ => Value::Null,
            }
        }
        Derivation::Ratio { numerator, denominator } => {
            let n = numeric(get(numerator)?, numerator, record_index)?;
            let d = numeric(get(denominator)?, denominator, record_index)?;
            match (n, d) {
                // NULLIF(denominator, 0)
                (Some(n), Some(d)) if d != 0.0 => Value::Numeric(n / d),
                _ => Value::Null,
            }
        }
        Derivation::HoursBetween { start, end } => {
            let s = timestamp(get(start)?, start, record_index)?;
            let e = timestamp(get(end)?, end, record_index)?;
            match (s, e) {
                (Some(s), Some(e)) => {
                    Value::Numeric((e - s).num_milliseconds() as f64 / MILLIS_PER_HOUR)
                }
                _ => Value::Null,
            }
        }
    })
}

/// Value emitted for a derived field, rounded when `field.round` is set
pub fn round_derived(field: &DerivedField, value: Value) -> Value {
    match field.round {
        Some(places) => value.rounded(places),
        None => value,
    }
}

fn operand<'r, R: FieldLookup>(row: &'r R, name: &str, record_index: usize) -> Result<&'r Value, SchemaError> {
    row.lookup(name).ok_or_else(|| SchemaError::MissingField { field: name.to_string(), record_index })
}

/// Integer minus integer stays an integer unless it overflows
fn difference(left: &Value, right: &Value, l: f64, r: f64) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            a.checked_sub(*b).map(Value::Integer).unwrap_or(Value::Numeric(l - r))
        }
        _ => Value::Numeric(l - r),
    }
}

fn numeric(value: &Value, field: &str, record_index: usize) -> Result<Option<f64>, SchemaError> {
    match value {
        Value::Null => Ok(None),
        v => v.as_f64().map(Some).ok_or_else(|| mismatch(field, "NUMERIC", v, record_index)),
    }
}

fn timestamp(
    value: &Value,
    field: &str,
    record_index: usize,
) -> Result<Option<chrono::NaiveDateTime>, SchemaError> {
    match value {
        Value::Null => Ok(None),
        v => v.as_timestamp().map(Some).ok_or_else(|| mismatch(field, "TIMESTAMP", v, record_index)),
    }
}

fn mismatch(field: &str, expected: &str, found: &Value, record_index: usize) -> SchemaError {
    SchemaError::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        found: found.type_name().to_string(),
        record_index,
    }
}
