//! Rows produced by the engine

use ridemetrics_types::{FieldLookup, Record, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Stand-in for fields a row does not carry
pub(crate) static NULL: Value = Value::Null;

/// An input record plus the statistics computed for it
///
/// Statistics are window outputs and derived fields, in evaluation order.
/// Lookups check the statistics first; definitions cannot shadow schema
/// fields, so this only matters for extra fields carried on the input.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    /// Position of the source record in the input batch
    pub source_index: usize,
    pub base: Record,
    pub stats: Record,
}

impl AnnotatedRecord {
    pub fn new(source_index: usize, base: Record) -> Self {
        AnnotatedRecord { source_index, base, stats: Record::new() }
    }

    pub fn stat(&self, field: &str) -> Option<&Value> {
        self.stats.get(field)
    }

    pub(crate) fn set_stat(&mut self, field: &str, value: Value) {
        let stats = std::mem::take(&mut self.stats);
        self.stats = stats.with(field, value);
    }
}

impl FieldLookup for AnnotatedRecord {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.stats.get(field).or_else(|| self.base.get(field))
    }
}

/// An annotated record plus one label per classification rule
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedRecord {
    pub annotated: AnnotatedRecord,
    /// Labels keyed by rule output, as text values
    pub labels: Record,
}

impl CategorizedRecord {
    pub fn new(annotated: AnnotatedRecord) -> Self {
        CategorizedRecord { annotated, labels: Record::new() }
    }

    pub fn source_index(&self) -> usize {
        self.annotated.source_index
    }

    /// Label assigned by the rule producing `output`
    pub fn label(&self, output: &str) -> Option<&str> {
        self.labels.get(output).and_then(Value::as_str)
    }

    /// Any field: labels, then statistics, then the source record
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.lookup(field)
    }

    pub(crate) fn set_label(&mut self, output: &str, label: &str) {
        let labels = std::mem::take(&mut self.labels);
        self.labels = labels.with(output, label);
    }

    /// Flatten into a plain record: source fields, statistics, labels
    ///
    /// The result can be fed into another report run.
    pub fn to_record(&self) -> Record {
        self.annotated.base.clone().merged(&self.annotated.stats).merged(&self.labels)
    }
}

impl FieldLookup for CategorizedRecord {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.labels.get(field).or_else(|| self.annotated.lookup(field))
    }
}

impl Serialize for CategorizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let flat = self.to_record();
        let mut map = serializer.serialize_map(Some(flat.len()))?;
        for (name, value) in flat.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorized() -> CategorizedRecord {
        let mut annotated = AnnotatedRecord::new(4, Record::new().with("driver_name", "D-04").with("fare", 18.0));
        annotated.set_stat("fare_rank", Value::Integer(2));
        let mut row = CategorizedRecord::new(annotated);
        row.set_label("tier", "Top");
        row
    }

    #[test]
    fn test_lookup_order() {
        let row = categorized();

        assert_eq!(row.get("fare_rank"), Some(&Value::Integer(2)));
        assert_eq!(row.get("driver_name"), Some(&Value::from("D-04")));
        assert_eq!(row.label("tier"), Some("Top"));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.source_index(), 4);
    }

    #[test]
    fn test_to_record_flattens_in_stage_order() {
        let record = categorized().to_record();
        let names: Vec<&str> = record.field_names().collect();

        assert_eq!(names, vec!["driver_name", "fare", "fare_rank", "tier"]);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let json = serde_json::to_string(&categorized()).unwrap();

        assert_eq!(json, r#"{"driver_name":"D-04","fare":18.0,"fare_rank":2,"tier":"Top"}"#);
    }
}
