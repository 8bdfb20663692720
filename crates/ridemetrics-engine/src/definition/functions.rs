//! Window function and derived field specifications

use serde::{Deserialize, Serialize};

/// A window function evaluated over each ordered partition
///
/// Parameters are signed so that out-of-range configuration can be
/// represented and rejected with a [`crate::ConfigurationError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowFunction {
    RowNumber,
    Rank,
    DenseRank,
    PercentRank,
    CumeDist,
    Ntile {
        buckets: i64,
    },
    Lead {
        field: String,
        #[serde(default = "default_offset")]
        offset: i64,
    },
    Lag {
        field: String,
        #[serde(default = "default_offset")]
        offset: i64,
    },
    FirstValue {
        field: String,
    },
    LastValue {
        field: String,
    },
    NthValue {
        field: String,
        n: i64,
    },
    /// COUNT/SUM/AVG/MIN/MAX over the whole partition
    PartitionAggregate {
        aggregate: AggregateKind,
        #[serde(default)]
        field: Option<String>,
    },
}

fn default_offset() -> i64 {
    1
}

impl WindowFunction {
    /// Display name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            WindowFunction::RowNumber => "ROW_NUMBER",
            WindowFunction::Rank => "RANK",
            WindowFunction::DenseRank => "DENSE_RANK",
            WindowFunction::PercentRank => "PERCENT_RANK",
            WindowFunction::CumeDist => "CUME_DIST",
            WindowFunction::Ntile { .. } => "NTILE",
            WindowFunction::Lead { .. } => "LEAD",
            WindowFunction::Lag { .. } => "LAG",
            WindowFunction::FirstValue { .. } => "FIRST_VALUE",
            WindowFunction::LastValue { .. } => "LAST_VALUE",
            WindowFunction::NthValue { .. } => "NTH_VALUE",
            WindowFunction::PartitionAggregate { aggregate, .. } => aggregate.name(),
        }
    }

    /// Whether the result depends on an explicit ORDER BY
    ///
    /// ROW_NUMBER falls back to input order and whole-partition aggregates
    /// ignore order entirely; every other function is meaningless without one.
    pub fn requires_ordering(&self) -> bool {
        !matches!(self, WindowFunction::RowNumber | WindowFunction::PartitionAggregate { .. })
    }

    /// Input field read by the function, if any
    pub fn target_field(&self) -> Option<&str> {
        match self {
            WindowFunction::Lead { field, .. }
            | WindowFunction::Lag { field, .. }
            | WindowFunction::FirstValue { field }
            | WindowFunction::LastValue { field }
            | WindowFunction::NthValue { field, .. } => Some(field),
            WindowFunction::PartitionAggregate { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateKind {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateKind::Count => "COUNT",
            AggregateKind::Sum => "SUM",
            AggregateKind::Avg => "AVG",
            AggregateKind::Min => "MIN",
            AggregateKind::Max => "MAX",
        }
    }
}

/// A window function bound to its output field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFunctionSpec {
    pub output: String,
    pub function: WindowFunction,
    /// Round numeric results to this many decimals
    #[serde(default)]
    pub round: Option<u32>,
}

impl WindowFunctionSpec {
    pub fn new(output: impl Into<String>, function: WindowFunction) -> Self {
        WindowFunctionSpec { output: output.into(), function, round: None }
    }

    pub fn rounded(mut self, places: u32) -> Self {
        self.round = Some(places);
        self
    }
}

/// Per-record arithmetic over fields already on the row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Derivation {
    /// `left - right`
    Difference { left: String, right: String },
    /// `(current - baseline) / baseline * 100`, NULL when baseline is zero
    PercentChange { current: String, baseline: String },
    /// `numerator / denominator`, NULL when the denominator is zero
    Ratio { numerator: String, denominator: String },
    /// Fractional hours from `start` to `end`
    HoursBetween { start: String, end: String },
}

impl Derivation {
    /// Fields read by the derivation, in operand order
    pub fn operands(&self) -> [&str; 2] {
        match self {
            Derivation::Difference { left, right } => [left, right],
            Derivation::PercentChange { current, baseline } => [current, baseline],
            Derivation::Ratio { numerator, denominator } => [numerator, denominator],
            Derivation::HoursBetween { start, end } => [start, end],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedField {
    pub output: String,
    pub derivation: Derivation,
    /// Decimal places of the emitted value. Later derived fields and
    /// classification rules read the unrounded value.
    #[serde(default)]
    pub round: Option<u32>,
}

impl DerivedField {
    pub fn new(output: impl Into<String>, derivation: Derivation) -> Self {
        DerivedField { output: output.into(), derivation, round: None }
    }

    pub fn rounded(mut self, places: u32) -> Self {
        self.round = Some(places);
        self
    }
}
