//! Post-classification selection: filter, re-sort, limit

use crate::{
    classify::evaluate_predicate, definition::SelectionSpec, record::CategorizedRecord,
    window::sort_rows,
};

/// Apply a selection to classified rows
///
/// Order of operations is filter, then stable sort, then limit.
pub fn apply_selection(mut rows: Vec<CategorizedRecord>, selection: &SelectionSpec) -> Vec<CategorizedRecord> {
    if let Some(filter) = &selection.filter {
        rows.retain(|row| evaluate_predicate(row, filter));
    }

    sort_rows(&mut rows, &selection.order_by);

    if let Some(limit) = selection.limit {
        rows.truncate(limit);
    }

    rows
}
