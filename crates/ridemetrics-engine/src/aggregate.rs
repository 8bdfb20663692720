//! Per-label group summaries

use indexmap::IndexMap;
use ridemetrics_types::{SchemaError, Value};
use serde::Serialize;

use crate::{definition::AggregationSpec, record::CategorizedRecord};

/// Statistics for one measure within a group, over non-null values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasureSummary {
    /// Number of non-null values that contributed
    pub values: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub sum: Option<f64>,
}

impl MeasureSummary {
    fn add(&mut self, value: f64) {
        self.values += 1;
        self.sum = Some(self.sum.unwrap_or(0.0) + value);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    fn finish(&mut self) {
        self.mean = self.sum.map(|s| s / self.values as f64);
    }
}

/// Rollup of every row sharing one label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub count: usize,
    pub measures: IndexMap<String, MeasureSummary>,
    /// Representative identifiers in encounter order
    pub examples: Vec<String>,
}

impl GroupSummary {
    fn new(label: String, spec: &AggregationSpec) -> Self {
        GroupSummary {
            label,
            count: 0,
            measures: spec.measures.iter().map(|m| (m.clone(), MeasureSummary::default())).collect(),
            examples: Vec::new(),
        }
    }

    pub fn measure(&self, field: &str) -> Option<&MeasureSummary> {
        self.measures.get(field)
    }
}

/// Group rows by the label of `spec.group_by`
///
/// Groups come out in first-seen order of their label. Examples are the
/// first `example_limit` non-null values of `example_field` within each
/// group, in row order.
pub fn summarize(rows: &[CategorizedRecord], spec: &AggregationSpec) -> Result<Vec<GroupSummary>, SchemaError> {
    let mut groups: IndexMap<String, GroupSummary> = IndexMap::new();

    for row in rows {
        let record_index = row.source_index();
        let label = match row.label(&spec.group_by) {
            Some(label) => label.to_string(),
            None => row
                .get(&spec.group_by)
                .ok_or_else(|| SchemaError::MissingField { field: spec.group_by.clone(), record_index })?
                .to_string(),
        };

        let group = groups.entry(label).or_insert_with_key(|label| GroupSummary::new(label.clone(), spec));
        group.count += 1;

        for (field, summary) in group.measures.iter_mut() {
            let value = row
                .get(field)
                .ok_or_else(|| SchemaError::MissingField { field: field.clone(), record_index })?;
            match value {
                Value::Null => {}
                v => {
                    let n = v.as_f64().ok_or_else(|| SchemaError::TypeMismatch {
                        field: field.clone(),
                        expected: "NUMERIC".to_string(),
                        found: v.type_name().to_string(),
                        record_index,
                    })?;
                    summary.add(n);
                }
            }
        }

        if let Some(example_field) = &spec.example_field {
            if group.examples.len() < spec.example_limit {
                match row.get(example_field) {
                    Some(Value::Null) | None => {}
                    Some(v) => group.examples.push(v.to_string()),
                }
            }
        }
    }

    Ok(groups
        .into_values()
        .map(|mut group| {
            group.measures.values_mut().for_each(MeasureSummary::finish);
            group
        })
        .collect())
}
