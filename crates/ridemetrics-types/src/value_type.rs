//! Declared column types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Column type declared by the data-loading collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Integer,
    Numeric,
    Text,
    Timestamp,
}

impl ValueType {
    /// Whether a value may be stored in a column of this type
    ///
    /// NULL fits every type, and integers widen into numeric columns.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (ValueType::Integer, Value::Integer(_))
                | (ValueType::Numeric, Value::Integer(_) | Value::Numeric(_))
                | (ValueType::Text, Value::Text(_))
                | (ValueType::Timestamp, Value::Timestamp(_))
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Integer => "INTEGER",
            ValueType::Numeric => "NUMERIC",
            ValueType::Text => "TEXT",
            ValueType::Timestamp => "TIMESTAMP",
        };
        write!(f, "{}", name)
    }
}
