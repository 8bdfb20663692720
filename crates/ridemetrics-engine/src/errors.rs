use std::fmt;

use ridemetrics_types::{SchemaError, Value};

/// A report definition that cannot be evaluated
///
/// Raised before any record is touched: when a [`crate::RankingEngine`] is
/// built, when a definition is parsed, or when a definition is checked
/// against the input schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    NonPositiveBucketCount {
        output: String,
        buckets: i64,
    },
    NonPositiveNthIndex {
        output: String,
        n: i64,
    },
    NonPositiveOffset {
        output: String,
        offset: i64,
    },
    /// The function compares order-key peers or positions and the definition has no ORDER BY
    OrderingRequired {
        output: String,
        function: &'static str,
    },
    UnknownField {
        field: String,
        context: String,
    },
    DuplicateOutput(String),
    EmptyOutputName(String),
    Parse(String),
    Io(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NonPositiveBucketCount { output, buckets } => write!(
                f,
                "Quantile bucket count for '{}' must be positive, got {}",
                output, buckets
            ),
            ConfigurationError::NonPositiveNthIndex { output, n } => {
                write!(f, "Nth-value index for '{}' must be positive, got {}", output, n)
            }
            ConfigurationError::NonPositiveOffset { output, offset } => {
                write!(f, "Offset for '{}' must be positive, got {}", output, offset)
            }
            ConfigurationError::OrderingRequired { output, function } => write!(
                f,
                "{} for '{}' requires a non-empty order key",
                function, output
            ),
            ConfigurationError::UnknownField { field, context } => {
                write!(f, "Unknown field '{}' referenced by {}", field, context)
            }
            ConfigurationError::DuplicateOutput(name) => {
                write!(f, "Output field '{}' is produced more than once", name)
            }
            ConfigurationError::EmptyOutputName(context) => {
                write!(f, "Empty output field name in {}", context)
            }
            ConfigurationError::Parse(msg) => write!(f, "Failed to parse report definition: {}", msg),
            ConfigurationError::Io(msg) => write!(f, "Failed to read report definition: {}", msg),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Failure of a whole engine invocation
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Schema(SchemaError),
    Configuration(ConfigurationError),
    /// A schema failure found while evaluating one partition
    InPartition {
        partition_key: Vec<Value>,
        source: SchemaError,
    },
}

impl EngineError {
    pub(crate) fn in_partition(partition_key: &[Value], source: SchemaError) -> Self {
        EngineError::InPartition { partition_key: partition_key.to_vec(), source }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Schema(e) => write!(f, "Schema error: {}", e),
            EngineError::Configuration(e) => write!(f, "Configuration error: {}", e),
            EngineError::InPartition { partition_key, source } => write!(
                f,
                "Schema error in partition ({}): {}",
                format_key(partition_key),
                source
            ),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Schema(e) | EngineError::InPartition { source: e, .. } => Some(e),
            EngineError::Configuration(e) => Some(e),
        }
    }
}

impl From<SchemaError> for EngineError {
    fn from(e: SchemaError) -> Self {
        EngineError::Schema(e)
    }
}

impl From<ConfigurationError> for EngineError {
    fn from(e: ConfigurationError) -> Self {
        EngineError::Configuration(e)
    }
}

/// Non-fatal conditions reported alongside a successful run
#[derive(Debug, Clone, PartialEq)]
pub enum EngineWarning {
    /// The partition had no members; it was skipped and omitted from output
    EmptyPartition { partition_key: Vec<Value> },
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineWarning::EmptyPartition { partition_key } => {
                write!(f, "Partition ({}) has no members and was skipped", format_key(partition_key))
            }
        }
    }
}

fn format_key(key: &[Value]) -> String {
    key.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}
