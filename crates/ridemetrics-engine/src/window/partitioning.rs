//! Record partitioning for window functions
//!
//! Groups records into partitions based on the partition key fields.

use indexmap::IndexMap;
use ridemetrics_types::{Record, SchemaError, Value};

/// A partition of records for window function evaluation
///
/// Holds borrowed records so partitioning never copies the input batch.
/// After [`super::sort_partition`] the members are in window order and
/// `sort_keys` holds each member's extracted order-key values.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    /// Partition key values shared by every member (empty when unpartitioned)
    pub key: Vec<Value>,
    pub rows: Vec<&'a Record>,
    /// Input position of each member
    pub original_indices: Vec<usize>,
    /// Order-key values per member, filled by sorting
    pub sort_keys: Vec<Vec<Value>>,
}

impl<'a> Partition<'a> {
    pub fn new(rows: Vec<&'a Record>) -> Self {
        let original_indices = (0..rows.len()).collect();
        Self::with_indices(Vec::new(), rows, original_indices)
    }

    pub fn with_indices(key: Vec<Value>, rows: Vec<&'a Record>, original_indices: Vec<usize>) -> Self {
        Self { key, rows, original_indices, sort_keys: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up `field` on the member at window position `idx`
    pub fn value(&self, idx: usize, field: &str) -> Result<&'a Value, SchemaError> {
        self.rows[idx].require(field, self.original_indices[idx])
    }

    /// Whether two members share every order-key value
    ///
    /// Members of an unsorted partition, or one sorted with no order key, are
    /// all peers of each other.
    pub fn is_peer(&self, a: usize, b: usize) -> bool {
        match (self.sort_keys.get(a), self.sort_keys.get(b)) {
            (Some(ka), Some(kb)) => super::sorting::keys_equal(ka, kb),
            _ => true,
        }
    }
}

/// Partition records by the partition key fields
///
/// Partitions are returned in first-appearance order of their key and
/// members keep their input order. With no partition fields every record
/// lands in a single partition, which is returned even when `records` is
/// empty so the caller can report it.
pub fn partition_records<'a>(
    records: &'a [Record],
    partition_by: &[String],
) -> Result<Vec<Partition<'a>>, SchemaError> {
    if partition_by.is_empty() {
        return Ok(vec![Partition::new(records.iter().collect())]);
    }

    // Group by canonical key; IndexMap keeps first-seen order and the
    // first-seen values become the partition's reported key
    type Group<'a> = (Vec<Value>, Vec<(usize, &'a Record)>);
    let mut partitions_map: IndexMap<Vec<Value>, Group<'a>> = IndexMap::new();

    for (original_idx, record) in records.iter().enumerate() {
        let partition_key = partition_by
            .iter()
            .map(|field| record.require(field, original_idx).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        let canonical = partition_key.iter().map(canonical_key_value).collect();

        partitions_map
            .entry(canonical)
            .or_insert_with(|| (partition_key, Vec::new()))
            .1
            .push((original_idx, record));
    }

    Ok(partitions_map
        .into_values()
        .map(|(key, rows_with_indices)| {
            let (indices, rows): (Vec<_>, Vec<_>) = rows_with_indices.into_iter().unzip();
            Partition::with_indices(key, rows, indices)
        })
        .collect())
}

/// Key form under which numerically equal values group together
///
/// Integral floats that fit an `i64` fold onto the integer, so `1` and `1.0`
/// (and `0.0` and `-0.0`) share a partition.
fn canonical_key_value(value: &Value) -> Value {
    match value {
        Value::Numeric(n) if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 => {
            Value::Integer(*n as i64)
        }
        other => other.clone(),
    }
}
