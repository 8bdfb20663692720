//! Value window functions
//!
//! Implements LAG, LEAD, FIRST_VALUE, LAST_VALUE and NTH_VALUE for accessing
//! values from other rows in the partition. The frame is always the whole
//! partition, so the positional functions broadcast one value to every row.

use ridemetrics_types::{SchemaError, Value};

use super::partitioning::Partition;

/// Evaluate LAG() value window function
///
/// Returns `field` from `offset` rows back, or NULL before the partition start.
///
/// Example: LAG(fare_amount, 1) over rides ordered by start time
pub fn evaluate_lag(partition: &Partition<'_>, field: &str, offset: usize) -> Result<Vec<Value>, SchemaError> {
    (0..partition.len())
        .map(|idx| match idx.checked_sub(offset) {
            Some(target_idx) => partition.value(target_idx, field).cloned(),
            None => Ok(Value::Null),
        })
        .collect()
}

/// Evaluate LEAD() value window function
///
/// Returns `field` from `offset` rows forward, or NULL past the partition end.
///
/// Example: LEAD(start_time) to find when a driver's next ride began
pub fn evaluate_lead(partition: &Partition<'_>, field: &str, offset: usize) -> Result<Vec<Value>, SchemaError> {
    (0..partition.len())
        .map(|idx| match idx.checked_add(offset).filter(|&t| t < partition.len()) {
            Some(target_idx) => partition.value(target_idx, field).cloned(),
            None => Ok(Value::Null),
        })
        .collect()
}

/// Evaluate FIRST_VALUE() value window function
pub fn evaluate_first_value(partition: &Partition<'_>, field: &str) -> Result<Vec<Value>, SchemaError> {
    evaluate_nth_value(partition, field, 1)
}

/// Evaluate LAST_VALUE() value window function
///
/// Uses the whole-partition frame, so this is the final row's value rather
/// than the current row's.
pub fn evaluate_last_value(partition: &Partition<'_>, field: &str) -> Result<Vec<Value>, SchemaError> {
    match partition.len().checked_sub(1) {
        Some(last_idx) => broadcast(partition, field, last_idx),
        None => Ok(Vec::new()),
    }
}

/// Evaluate NTH_VALUE() value window function
///
/// `n` is 1-based. Every row gets NULL when the partition has fewer than `n`
/// rows.
pub fn evaluate_nth_value(partition: &Partition<'_>, field: &str, n: usize) -> Result<Vec<Value>, SchemaError> {
    match n.checked_sub(1).filter(|&idx| idx < partition.len()) {
        Some(idx) => broadcast(partition, field, idx),
        None => Ok(vec![Value::Null; partition.len()]),
    }
}

fn broadcast(partition: &Partition<'_>, field: &str, idx: usize) -> Result<Vec<Value>, SchemaError> {
    let value = partition.value(idx, field)?;
    Ok(vec![value.clone(); partition.len()])
}
