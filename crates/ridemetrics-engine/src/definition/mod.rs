//! Report definitions
//!
//! A [`ReportDefinition`] is the whole configuration surface of one engine
//! run: partition and order keys, window functions, derived fields,
//! classification rules, and the optional selection and aggregation steps.
//! Definitions are plain serde data so they can be built in code with the
//! builder methods below or loaded from TOML/JSON files.

mod functions;
mod ordering;
mod rules;
mod validation;

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

pub use functions::{AggregateKind, Derivation, DerivedField, WindowFunction, WindowFunctionSpec};
pub use ordering::{NullPlacement, OrderByItem, SortDirection};
pub use rules::{
    AggregationSpec, ClassificationCase, ClassificationRule, CompareOp, Predicate, SelectionSpec,
};
pub(crate) use validation::{check_field_references, validate_definition};

use crate::errors::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub name: String,
    #[serde(default)]
    pub partition_by: Vec<String>,
    #[serde(default)]
    pub order_by: Vec<OrderByItem>,
    #[serde(default)]
    pub window_functions: Vec<WindowFunctionSpec>,
    #[serde(default)]
    pub derived_fields: Vec<DerivedField>,
    #[serde(default)]
    pub classifications: Vec<ClassificationRule>,
    #[serde(default)]
    pub selection: SelectionSpec,
    #[serde(default)]
    pub aggregation: Option<AggregationSpec>,
}

impl ReportDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        ReportDefinition {
            name: name.into(),
            partition_by: Vec::new(),
            order_by: Vec::new(),
            window_functions: Vec::new(),
            derived_fields: Vec::new(),
            classifications: Vec::new(),
            selection: SelectionSpec::default(),
            aggregation: None,
        }
    }

    pub fn partition_by<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.partition_by = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append a window sort key
    pub fn order_by(mut self, item: OrderByItem) -> Self {
        self.order_by.push(item);
        self
    }

    pub fn window(mut self, output: impl Into<String>, function: WindowFunction) -> Self {
        self.window_functions.push(WindowFunctionSpec::new(output, function));
        self
    }

    /// Append a window function whose numeric output is rounded
    pub fn window_rounded(
        mut self,
        output: impl Into<String>,
        function: WindowFunction,
        places: u32,
    ) -> Self {
        self.window_functions.push(WindowFunctionSpec::new(output, function).rounded(places));
        self
    }

    pub fn derive(mut self, field: DerivedField) -> Self {
        self.derived_fields.push(field);
        self
    }

    pub fn classify(mut self, rule: ClassificationRule) -> Self {
        self.classifications.push(rule);
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.selection.filter = Some(predicate);
        self
    }

    /// Append a selection sort key
    pub fn sort_by(mut self, item: OrderByItem) -> Self {
        self.selection.order_by.push(item);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.selection.limit = Some(limit);
        self
    }

    pub fn aggregate(mut self, spec: AggregationSpec) -> Self {
        self.aggregation = Some(spec);
        self
    }

    /// Every output field the definition adds to a row, in evaluation order
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.window_functions
            .iter()
            .map(|w| w.output.as_str())
            .chain(self.derived_fields.iter().map(|d| d.output.as_str()))
            .chain(self.classifications.iter().map(|c| c.output.as_str()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(content).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(content).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Load a definition file, choosing the format from its extension
    ///
    /// `.json` files are parsed as JSON; anything else is parsed as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Io(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }
}
