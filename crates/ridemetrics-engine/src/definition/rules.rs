//! Predicates, classification rules, selection and aggregation specs

use ridemetrics_types::Value;
use serde::{Deserialize, Serialize};

use super::ordering::OrderByItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

/// A boolean test over one row's fields
///
/// Comparisons involving NULL are false, so a rule such as
/// `idle_hours > 4` never matches a row whose `idle_hours` is NULL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    Compare { field: String, op: CompareOp, value: Value },
    CompareFields { left: String, op: CompareOp, right: String },
    /// Inclusive on both ends
    Between { field: String, low: Value, high: Value },
    InSet { field: String, values: Vec<Value> },
    IsNull { field: String },
    IsNotNull { field: String },
    All { predicates: Vec<Predicate> },
    Any { predicates: Vec<Predicate> },
    Not { predicate: Box<Predicate> },
}

impl Predicate {
    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Predicate::Compare { field: field.into(), op, value: value.into() }
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Le, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ge, value)
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    pub fn compare_fields(left: impl Into<String>, op: CompareOp, right: impl Into<String>) -> Self {
        Predicate::CompareFields { left: left.into(), op, right: right.into() }
    }

    pub fn between(field: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Predicate::Between { field: field.into(), low: low.into(), high: high.into() }
    }

    pub fn in_set<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Predicate::InSet { field: field.into(), values: values.into_iter().map(Into::into).collect() }
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Predicate::IsNull { field: field.into() }
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Predicate::IsNotNull { field: field.into() }
    }

    pub fn all(predicates: Vec<Predicate>) -> Self {
        Predicate::All { predicates }
    }

    pub fn any(predicates: Vec<Predicate>) -> Self {
        Predicate::Any { predicates }
    }

    pub fn negate(predicate: Predicate) -> Self {
        Predicate::Not { predicate: Box::new(predicate) }
    }

    /// Every field name the predicate reads
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::Compare { field, .. }
            | Predicate::Between { field, .. }
            | Predicate::InSet { field, .. }
            | Predicate::IsNull { field }
            | Predicate::IsNotNull { field } => out.push(field),
            Predicate::CompareFields { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            Predicate::All { predicates } | Predicate::Any { predicates } => {
                for p in predicates {
                    p.collect_fields(out);
                }
            }
            Predicate::Not { predicate } => predicate.collect_fields(out),
        }
    }
}

/// One `WHEN predicate THEN label` arm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationCase {
    pub when: Predicate,
    pub label: String,
}

/// Ordered decision table producing one label field
///
/// Cases are evaluated in the order given; the first match wins and
/// `default_label` applies when nothing matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub output: String,
    #[serde(default)]
    pub cases: Vec<ClassificationCase>,
    pub default_label: String,
}

impl ClassificationRule {
    pub fn new(output: impl Into<String>, default_label: impl Into<String>) -> Self {
        ClassificationRule { output: output.into(), cases: Vec::new(), default_label: default_label.into() }
    }

    /// Append a case after the existing ones
    pub fn case(mut self, when: Predicate, label: impl Into<String>) -> Self {
        self.cases.push(ClassificationCase { when, label: label.into() });
        self
    }
}

/// Post-classification filter, re-sort and limit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSpec {
    #[serde(default)]
    pub filter: Option<Predicate>,
    #[serde(default)]
    pub order_by: Vec<OrderByItem>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Per-label summaries over the selected rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSpec {
    /// Output name of the classification rule whose labels define the groups
    pub group_by: String,
    #[serde(default)]
    pub measures: Vec<String>,
    /// Field whose values are listed as representative examples
    #[serde(default)]
    pub example_field: Option<String>,
    #[serde(default = "default_example_limit")]
    pub example_limit: usize,
}

fn default_example_limit() -> usize {
    3
}

impl AggregationSpec {
    pub fn new(group_by: impl Into<String>) -> Self {
        AggregationSpec {
            group_by: group_by.into(),
            measures: Vec::new(),
            example_field: None,
            example_limit: default_example_limit(),
        }
    }

    pub fn measure(mut self, field: impl Into<String>) -> Self {
        self.measures.push(field.into());
        self
    }

    pub fn examples(mut self, field: impl Into<String>, limit: usize) -> Self {
        self.example_field = Some(field.into());
        self.example_limit = limit;
        self
    }
}
