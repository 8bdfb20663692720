//! Window Function Evaluator
//!
//! This module implements the window function evaluation engine that:
//! - Partitions records by the partition key
//! - Sorts partitions by the order key
//! - Evaluates window functions over the whole-partition frame
//!
//! # Module Organization
//!
//! - `partitioning` - Partition management and record grouping
//! - `sorting` - Partition sorting, value comparison and peer groups
//! - `ranking` - Ranking functions (ROW_NUMBER, RANK, DENSE_RANK, NTILE)
//! - `distribution` - Relative standing (PERCENT_RANK, CUME_DIST)
//! - `value` - Value access functions (LAG, LEAD, FIRST_VALUE, LAST_VALUE, NTH_VALUE)
//! - `aggregates` - Whole-partition aggregates (COUNT, SUM, AVG, MIN, MAX)

mod aggregates;
mod distribution;
mod partitioning;
mod ranking;
mod sorting;
mod value;

use ridemetrics_types::Value;

pub use aggregates::evaluate_partition_aggregate;
pub use distribution::{evaluate_cume_dist, evaluate_percent_rank};
pub use partitioning::{partition_records, Partition};
pub use ranking::{evaluate_dense_rank, evaluate_ntile, evaluate_rank, evaluate_row_number};
pub use sorting::{compare_values, compare_with_nulls, keys_equal, peer_groups, sort_partition, sort_rows};
pub use value::{
    evaluate_first_value, evaluate_lag, evaluate_last_value, evaluate_lead, evaluate_nth_value,
};

use crate::{
    definition::{WindowFunction, WindowFunctionSpec},
    errors::{ConfigurationError, EngineError},
};

/// Evaluate one window function over a sorted partition
///
/// Returns one value per member in window order, rounded when `spec.round`
/// is set. Parameters are re-checked here so the evaluator is safe to call
/// with a definition that never went through engine construction.
pub fn evaluate_window_function(
    partition: &Partition<'_>,
    spec: &WindowFunctionSpec,
) -> Result<Vec<Value>, EngineError> {
    let in_partition = |e| EngineError::in_partition(&partition.key, e);

    let values = match &spec.function {
        WindowFunction::RowNumber => evaluate_row_number(partition),
        WindowFunction::Rank => evaluate_rank(partition),
        WindowFunction::DenseRank => evaluate_dense_rank(partition),
        WindowFunction::PercentRank => evaluate_percent_rank(partition),
        WindowFunction::CumeDist => evaluate_cume_dist(partition),
        WindowFunction::Ntile { buckets } => {
            let n = positive(*buckets).ok_or_else(|| ConfigurationError::NonPositiveBucketCount {
                output: spec.output.clone(),
                buckets: *buckets,
            })?;
            evaluate_ntile(partition, n)
        }
        WindowFunction::Lead { field, offset } => {
            let offset = positive_offset(spec, *offset)?;
            evaluate_lead(partition, field, offset).map_err(in_partition)?
        }
        WindowFunction::Lag { field, offset } => {
            let offset = positive_offset(spec, *offset)?;
            evaluate_lag(partition, field, offset).map_err(in_partition)?
        }
        WindowFunction::FirstValue { field } => {
            evaluate_first_value(partition, field).map_err(in_partition)?
        }
        WindowFunction::LastValue { field } => {
            evaluate_last_value(partition, field).map_err(in_partition)?
        }
        WindowFunction::NthValue { field, n } => {
            let n = positive(*n).ok_or_else(|| ConfigurationError::NonPositiveNthIndex {
                output: spec.output.clone(),
                n: *n,
            })?;
            evaluate_nth_value(partition, field, n).map_err(in_partition)?
        }
        WindowFunction::PartitionAggregate { aggregate, field } => {
            evaluate_partition_aggregate(partition, *aggregate, field.as_deref()).map_err(in_partition)?
        }
    };

    Ok(match spec.round {
        Some(places) => values.into_iter().map(|v| v.rounded(places)).collect(),
        None => values,
    })
}

fn positive(n: i64) -> Option<usize> {
    usize::try_from(n).ok().filter(|&n| n > 0)
}

fn positive_offset(spec: &WindowFunctionSpec, offset: i64) -> Result<usize, ConfigurationError> {
    positive(offset)
        .ok_or_else(|| ConfigurationError::NonPositiveOffset { output: spec.output.clone(), offset })
}

#[cfg(test)]
mod tests;
