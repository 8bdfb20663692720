//! Declared record schemas

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Record, SchemaError, ValueType};

/// Uniform schema declared for a record batch: field name → type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: IndexMap<String, ValueType>,
}

impl Schema {
    pub fn new() -> Self {
        Schema { fields: IndexMap::new() }
    }

    /// Builder-style field declaration
    pub fn with_field(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.fields.insert(name.into(), value_type);
        self
    }

    pub fn field_type(&self, name: &str) -> Option<ValueType> {
        self.fields.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, ValueType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Check that a record carries every declared field with a compatible value
    ///
    /// Extra fields on the record are allowed; they are carried through
    /// untouched.
    pub fn validate_record(&self, record_index: usize, record: &Record) -> Result<(), SchemaError> {
        for (name, value_type) in &self.fields {
            let value = record.require(name, record_index)?;
            if !value_type.accepts(value) {
                return Err(SchemaError::TypeMismatch {
                    field: name.clone(),
                    expected: value_type.to_string(),
                    found: value.type_name().to_string(),
                    record_index,
                });
            }
        }
        Ok(())
    }

    /// Validate a whole batch, failing on the first offending record
    pub fn validate_all(&self, records: &[Record]) -> Result<(), SchemaError> {
        records.iter().enumerate().try_for_each(|(idx, record)| self.validate_record(idx, record))
    }
}

impl<K: Into<String>> FromIterator<(K, ValueType)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, ValueType)>>(iter: I) -> Self {
        Schema { fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}
