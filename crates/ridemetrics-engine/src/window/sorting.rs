//! Partition sorting for window functions
//!
//! Sorts records within partitions according to the order key.

use std::{cmp::Ordering, ops::Range};

use ridemetrics_types::{FieldLookup, SchemaError, Value};

use super::partitioning::Partition;
use crate::{
    definition::{NullPlacement, OrderByItem, SortDirection},
    record::NULL,
};

/// Sort a partition by its order key
///
/// Extracts each member's order-key values once, then performs a stable
/// index sort, so members whose keys all compare equal keep input order.
/// Keeps `original_indices` in sync with the sorted rows.
pub fn sort_partition(partition: &mut Partition<'_>, order_by: &[OrderByItem]) -> Result<(), SchemaError> {
    let mut keys = (0..partition.len())
        .map(|idx| {
            order_by
                .iter()
                .map(|item| partition.value(idx, &item.field).cloned())
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    // If no order key, keep input order
    if order_by.is_empty() {
        partition.sort_keys = keys;
        return Ok(());
    }

    let mut indices: Vec<usize> = (0..partition.len()).collect();
    indices.sort_by(|&a, &b| compare_keys(&keys[a], &keys[b], order_by));

    let old_rows = std::mem::take(&mut partition.rows);
    let old_indices = std::mem::take(&mut partition.original_indices);

    partition.rows = indices.iter().map(|&i| old_rows[i]).collect();
    partition.original_indices = indices.iter().map(|&i| old_indices[i]).collect();
    partition.sort_keys = indices.iter().map(|&i| std::mem::take(&mut keys[i])).collect();

    Ok(())
}

/// Sort any rows by an order key, stably
///
/// Rows missing a key field sort as NULL; callers check field references
/// up front.
pub fn sort_rows<R: FieldLookup>(rows: &mut [R], order_by: &[OrderByItem]) {
    if order_by.is_empty() {
        return;
    }

    rows.sort_by(|a, b| {
        for item in order_by {
            let val_a = a.lookup(&item.field).unwrap_or(&NULL);
            let val_b = b.lookup(&item.field).unwrap_or(&NULL);

            let cmp = compare_with_nulls(val_a, val_b, item);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    });
}

fn compare_keys(a: &[Value], b: &[Value], order_by: &[OrderByItem]) -> Ordering {
    for ((val_a, val_b), item) in a.iter().zip(b).zip(order_by) {
        let cmp = compare_with_nulls(val_a, val_b, item);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }
    Ordering::Equal
}

/// Compare two values under one sort key
///
/// NULL placement is applied after direction, so `nulls = Last` keeps
/// NULLs at the end for descending keys too.
pub fn compare_with_nulls(a: &Value, b: &Value, item: &OrderByItem) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => match item.nulls {
            NullPlacement::First => Ordering::Less,
            NullPlacement::Last => Ordering::Greater,
        },
        (false, true) => match item.nulls {
            NullPlacement::First => Ordering::Greater,
            NullPlacement::Last => Ordering::Less,
        },
        (false, false) => {
            let cmp = compare_values(a, b);
            match item.direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        }
    }
}

/// Compare two values for ordering
///
/// Integers and numerics interleave numerically with NaN above every
/// number. Values of different kinds order numbers < text < timestamps.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    a.sql_cmp(b).unwrap_or_else(|| a.cmp(b))
}

/// Peer test for two order-key tuples; NULL equals NULL
pub fn keys_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| compare_values(x, y) == Ordering::Equal)
}

/// Window-position ranges of consecutive peer groups in a sorted partition
pub fn peer_groups(partition: &Partition<'_>) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;

    for idx in 1..=partition.len() {
        if idx == partition.len() || !partition.is_peer(idx - 1, idx) {
            groups.push(start..idx);
            start = idx;
        }
    }

    groups
}
