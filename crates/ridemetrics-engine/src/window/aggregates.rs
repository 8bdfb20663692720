//! Aggregate window functions
//!
//! Implements COUNT, SUM, AVG, MIN, MAX over the whole partition. The single
//! result is broadcast to every row.

use std::cmp::Ordering;

use ridemetrics_types::{SchemaError, Value};

use super::{partitioning::Partition, sorting::compare_values};
use crate::definition::AggregateKind;

/// Evaluate an aggregate window function and broadcast it over the partition
pub fn evaluate_partition_aggregate(
    partition: &Partition<'_>,
    kind: AggregateKind,
    field: Option<&str>,
) -> Result<Vec<Value>, SchemaError> {
    let result = match (kind, field) {
        // COUNT(*) - count all rows
        (AggregateKind::Count, None) => Value::Integer(partition.len() as i64),
        (AggregateKind::Count, Some(field)) => evaluate_count(partition, field)?,
        (AggregateKind::Sum, Some(field)) => evaluate_sum(partition, field)?,
        (AggregateKind::Avg, Some(field)) => evaluate_avg(partition, field)?,
        (AggregateKind::Min, Some(field)) => evaluate_extreme(partition, field, Ordering::Less)?,
        (AggregateKind::Max, Some(field)) => evaluate_extreme(partition, field, Ordering::Greater)?,
        // SUM/AVG/MIN/MAX with no argument have nothing to aggregate
        (_, None) => Value::Null,
    };

    Ok(vec![result; partition.len()])
}

/// COUNT(field) - counts rows where the field is not NULL
fn evaluate_count(partition: &Partition<'_>, field: &str) -> Result<Value, SchemaError> {
    let mut count = 0i64;
    for idx in 0..partition.len() {
        if !partition.value(idx, field)?.is_null() {
            count += 1;
        }
    }
    Ok(Value::Integer(count))
}

/// SUM(field), ignoring NULLs
///
/// Stays an integer while every value is an integer and the total fits;
/// otherwise the sum is numeric. NULL when no value is present.
fn evaluate_sum(partition: &Partition<'_>, field: &str) -> Result<Value, SchemaError> {
    let mut int_sum: Option<i64> = Some(0);
    let mut sum = 0.0f64;
    let mut has_value = false;

    for idx in 0..partition.len() {
        let val = partition.value(idx, field)?;
        match val {
            Value::Null => {}
            Value::Integer(n) => {
                int_sum = int_sum.and_then(|s| s.checked_add(*n));
                sum += *n as f64;
                has_value = true;
            }
            Value::Numeric(n) => {
                int_sum = None;
                sum += n;
                has_value = true;
            }
            other => return Err(numeric_mismatch(partition, idx, field, other)),
        }
    }

    Ok(match (has_value, int_sum) {
        (false, _) => Value::Null,
        (true, Some(total)) => Value::Integer(total),
        (true, None) => Value::Numeric(sum),
    })
}

/// AVG(field), ignoring NULLs
fn evaluate_avg(partition: &Partition<'_>, field: &str) -> Result<Value, SchemaError> {
    let mut sum = 0.0f64;
    let mut count = 0i64;

    for idx in 0..partition.len() {
        let val = partition.value(idx, field)?;
        match val.as_f64() {
            Some(n) => {
                sum += n;
                count += 1;
            }
            None if val.is_null() => {}
            None => return Err(numeric_mismatch(partition, idx, field, val)),
        }
    }

    if count > 0 {
        Ok(Value::Numeric(sum / count as f64))
    } else {
        Ok(Value::Null)
    }
}

/// MIN (`wanted = Less`) or MAX (`wanted = Greater`), ignoring NULLs
fn evaluate_extreme(partition: &Partition<'_>, field: &str, wanted: Ordering) -> Result<Value, SchemaError> {
    let mut best: Option<&Value> = None;

    for idx in 0..partition.len() {
        let val = partition.value(idx, field)?;
        if val.is_null() {
            continue;
        }

        match best {
            Some(current) if compare_values(val, current) != wanted => {}
            _ => best = Some(val),
        }
    }

    Ok(best.cloned().unwrap_or(Value::Null))
}

fn numeric_mismatch(partition: &Partition<'_>, idx: usize, field: &str, found: &Value) -> SchemaError {
    SchemaError::TypeMismatch {
        field: field.to_string(),
        expected: "NUMERIC".to_string(),
        found: found.type_name().to_string(),
        record_index: partition.original_indices[idx],
    }
}
