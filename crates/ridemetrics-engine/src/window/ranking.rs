//! Ranking window functions
//!
//! Implements ROW_NUMBER, RANK, DENSE_RANK, and NTILE.

use ridemetrics_types::Value;

use super::partitioning::Partition;

/// Evaluate ROW_NUMBER() window function
///
/// Returns unique sequential integers starting from 1 for each row in the partition.
/// Ties (based on the order key) keep input order.
///
/// Example: [1, 2, 3, 4, 5] regardless of duplicate values
pub fn evaluate_row_number(partition: &Partition<'_>) -> Vec<Value> {
    (1..=partition.len()).map(|n| Value::Integer(n as i64)).collect()
}

/// Evaluate RANK() window function
///
/// Returns rank with gaps when there are ties.
/// Rows with equal order-key values get the same rank.
/// Next rank after tie skips numbers.
///
/// Example for scores [95, 90, 90, 85]: ranks are [1, 2, 2, 4]
///
/// Requires a sorted partition.
pub fn evaluate_rank(partition: &Partition<'_>) -> Vec<Value> {
    let mut ranks = Vec::with_capacity(partition.len());
    let mut current_rank = 1i64;

    for idx in 0..partition.len() {
        if idx > 0 && !partition.is_peer(idx - 1, idx) {
            // New rank group - rank becomes row number (1-indexed)
            current_rank = (idx + 1) as i64;
        }
        ranks.push(Value::Integer(current_rank));
    }

    ranks
}

/// Evaluate DENSE_RANK() window function
///
/// Returns rank without gaps when there are ties.
///
/// Example for scores [95, 90, 90, 85]: ranks are [1, 2, 2, 3]
///
/// Requires a sorted partition.
pub fn evaluate_dense_rank(partition: &Partition<'_>) -> Vec<Value> {
    let mut ranks = Vec::with_capacity(partition.len());
    let mut current_rank = 1i64;

    for idx in 0..partition.len() {
        if idx > 0 && !partition.is_peer(idx - 1, idx) {
            current_rank += 1;
        }
        ranks.push(Value::Integer(current_rank));
    }

    ranks
}

/// Evaluate NTILE(n) window function
///
/// Divides partition into n approximately equal groups (buckets/tiles).
/// Returns the group number (1 to n) for each row.
///
/// If rows don't divide evenly, earlier groups get one extra row.
/// Example: NTILE(4) on 7 rows → groups of [2, 2, 2, 1] rows
///
/// With more buckets than rows each row gets its own bucket and the
/// higher buckets stay empty.
pub fn evaluate_ntile(partition: &Partition<'_>, n: usize) -> Vec<Value> {
    let total_rows = partition.len();

    if n >= total_rows {
        return (1..=total_rows).map(|i| Value::Integer(i as i64)).collect();
    }

    // First `remainder` buckets get (base_size + 1) rows
    let base_size = total_rows / n;
    let remainder = total_rows % n;

    let mut bucket_numbers = Vec::with_capacity(total_rows);
    let mut current_bucket = 1usize;
    let mut rows_in_current_bucket = 0;

    for _ in 0..total_rows {
        bucket_numbers.push(Value::Integer(current_bucket as i64));
        rows_in_current_bucket += 1;

        let bucket_size = if current_bucket <= remainder { base_size + 1 } else { base_size };

        if rows_in_current_bucket >= bucket_size {
            current_bucket += 1;
            rows_in_current_bucket = 0;
        }
    }

    bucket_numbers
}
