use std::fmt;

/// A record does not match the fields a report needs
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    MissingField {
        field: String,
        record_index: usize,
    },
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
        record_index: usize,
    },
}

impl SchemaError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            SchemaError::MissingField { field, .. } | SchemaError::TypeMismatch { field, .. } => {
                field
            }
        }
    }

    /// Input position of the offending record
    pub fn record_index(&self) -> usize {
        match self {
            SchemaError::MissingField { record_index, .. }
            | SchemaError::TypeMismatch { record_index, .. } => *record_index,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingField { field, record_index } => {
                write!(f, "Field '{}' is missing from record {}", field, record_index)
            }
            SchemaError::TypeMismatch { field, expected, found, record_index } => write!(
                f,
                "Field '{}' in record {} has type {}, expected {}",
                field, record_index, found, expected
            ),
        }
    }
}

impl std::error::Error for SchemaError {}
