//! Relative-standing window functions: PERCENT_RANK and CUME_DIST

use ridemetrics_types::Value;

use super::{partitioning::Partition, ranking::evaluate_rank, sorting::peer_groups};

/// Evaluate PERCENT_RANK() window function
///
/// `(rank - 1) / (size - 1)`, or 0 for a single-row partition. The best row
/// gets 0.0 and the worst peer group 1.0.
pub fn evaluate_percent_rank(partition: &Partition<'_>) -> Vec<Value> {
    let size = partition.len();
    if size <= 1 {
        return vec![Value::Numeric(0.0); size];
    }

    let denominator = (size - 1) as f64;
    evaluate_rank(partition)
        .into_iter()
        .map(|rank| match rank {
            Value::Integer(r) => Value::Numeric((r - 1) as f64 / denominator),
            _ => Value::Null,
        })
        .collect()
}

/// Evaluate CUME_DIST() window function
///
/// Fraction of rows ordered at or before the current row, counting through
/// the end of its peer group.
pub fn evaluate_cume_dist(partition: &Partition<'_>) -> Vec<Value> {
    let size = partition.len() as f64;
    let mut result = Vec::with_capacity(partition.len());

    for group in peer_groups(partition) {
        let dist = group.end as f64 / size;
        result.extend(group.map(|_| Value::Numeric(dist)));
    }

    result
}
