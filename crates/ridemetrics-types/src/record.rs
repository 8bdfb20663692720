//! Immutable field-name → value records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{SchemaError, Value};

/// Read access to named fields
///
/// Implemented by plain records and by the engine's annotated and
/// categorized rows, so predicates and sort keys can look fields up without
/// caring which stage produced them.
pub trait FieldLookup {
    fn lookup(&self, field: &str) -> Option<&Value>;
}

/// A single input row - insertion-ordered mapping from field name to value
///
/// Records are built once (by the loading collaborator or with [`Record::with`])
/// and only read afterwards; the engine produces new rows instead of
/// modifying its input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: IndexMap::new() }
    }

    /// Builder-style insertion; replaces an existing field of the same name
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a field or report it missing for the record at `record_index`
    pub fn require(&self, field: &str, record_index: usize) -> Result<&Value, SchemaError> {
        self.fields
            .get(field)
            .ok_or_else(|| SchemaError::MissingField { field: field.to_string(), record_index })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Append every field of `other`, replacing fields of the same name
    pub fn merged(mut self, other: &Record) -> Self {
        for (name, value) in &other.fields {
            self.fields.insert(name.clone(), value.clone());
        }
        self
    }
}

impl FieldLookup for Record {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
