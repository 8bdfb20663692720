//! Scalar value runtime representation

mod comparison;
mod display;
mod hash;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Largest number of decimal places [`Value::rounded`] honors
const MAX_ROUNDING_PLACES: u32 = 15;

/// Scalar values carried by records
///
/// Deserialization is untagged: JSON/TOML integers become `Integer`, other
/// numbers `Numeric`, ISO-8601 date-time strings `Timestamp`, any other string
/// `Text`, and `null` becomes `Null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Numeric(f64),
    Timestamp(NaiveDateTime),
    Text(String),
    Null,
}

impl Value {
    /// Check if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Numeric(_) => "NUMERIC",
            Value::Timestamp(_) => "TIMESTAMP",
            Value::Text(_) => "TEXT",
            Value::Null => "NULL",
        }
    }

    /// Numeric view of the value; integers widen to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Round a numeric value half away from zero to `places` decimals
    ///
    /// Integers, text, timestamps and NULL are returned unchanged. `places`
    /// beyond 15 is treated as 15, and a value too large to scale is kept as
    /// is.
    pub fn rounded(&self, places: u32) -> Value {
        match self {
            Value::Numeric(n) if n.is_finite() => {
                // f64 carries at most 17 significant digits
                let factor = 10f64.powi(places.min(MAX_ROUNDING_PLACES) as i32);
                let scaled = n * factor;
                if scaled.is_finite() {
                    Value::Numeric(scaled.round() / factor)
                } else {
                    self.clone()
                }
            }
            other => other.clone(),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Numeric(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
