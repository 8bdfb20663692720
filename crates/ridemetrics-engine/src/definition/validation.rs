//! Up-front checks on report definitions

use indexmap::IndexSet;
use ridemetrics_types::Schema;

use super::{ReportDefinition, WindowFunction};
use crate::errors::ConfigurationError;

/// Schema-independent checks, run when an engine is built
pub(crate) fn validate_definition(def: &ReportDefinition) -> Result<(), ConfigurationError> {
    for spec in &def.window_functions {
        if spec.output.is_empty() {
            return Err(ConfigurationError::EmptyOutputName(format!(
                "{} window function",
                spec.function.name()
            )));
        }

        match &spec.function {
            WindowFunction::Ntile { buckets } if *buckets <= 0 => {
                return Err(ConfigurationError::NonPositiveBucketCount {
                    output: spec.output.clone(),
                    buckets: *buckets,
                });
            }
            WindowFunction::NthValue { n, .. } if *n <= 0 => {
                return Err(ConfigurationError::NonPositiveNthIndex {
                    output: spec.output.clone(),
                    n: *n,
                });
            }
            WindowFunction::Lead { offset, .. } | WindowFunction::Lag { offset, .. }
                if *offset <= 0 =>
            {
                return Err(ConfigurationError::NonPositiveOffset {
                    output: spec.output.clone(),
                    offset: *offset,
                });
            }
            _ => {}
        }

        if spec.function.requires_ordering() && def.order_by.is_empty() {
            return Err(ConfigurationError::OrderingRequired {
                output: spec.output.clone(),
                function: spec.function.name(),
            });
        }
    }

    if def.derived_fields.iter().any(|d| d.output.is_empty()) {
        return Err(ConfigurationError::EmptyOutputName("derived field".to_string()));
    }
    if def.classifications.iter().any(|c| c.output.is_empty()) {
        return Err(ConfigurationError::EmptyOutputName("classification rule".to_string()));
    }

    let mut seen = IndexSet::new();
    for output in def.outputs() {
        if !seen.insert(output) {
            return Err(ConfigurationError::DuplicateOutput(output.to_string()));
        }
    }

    if let Some(aggregation) = &def.aggregation {
        if !def.classifications.iter().any(|c| c.output == aggregation.group_by) {
            return Err(ConfigurationError::UnknownField {
                field: aggregation.group_by.clone(),
                context: "aggregation group_by (must name a classification output)".to_string(),
            });
        }
    }

    Ok(())
}

/// Resolve every field reference against the input schema
///
/// Each stage may read the schema fields plus whatever earlier stages
/// produced: window outputs, then derived fields in order, then the labels
/// of earlier classification rules.
pub(crate) fn check_field_references(
    def: &ReportDefinition,
    schema: &Schema,
) -> Result<(), ConfigurationError> {
    let mut known: IndexSet<&str> = schema.fields().map(|(name, _)| name).collect();

    let require = |known: &IndexSet<&str>, field: &str, context: &str| {
        if known.contains(field) {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownField {
                field: field.to_string(),
                context: context.to_string(),
            })
        }
    };

    for output in def.outputs() {
        if schema.contains(output) {
            return Err(ConfigurationError::DuplicateOutput(output.to_string()));
        }
    }

    for field in &def.partition_by {
        require(&known, field, "partition key")?;
    }
    for item in &def.order_by {
        require(&known, &item.field, "order key")?;
    }
    for spec in &def.window_functions {
        if let Some(field) = spec.function.target_field() {
            require(&known, field, &format!("window function '{}'", spec.output))?;
        }
    }
    known.extend(def.window_functions.iter().map(|w| w.output.as_str()));

    for derived in &def.derived_fields {
        for operand in derived.derivation.operands() {
            require(&known, operand, &format!("derived field '{}'", derived.output))?;
        }
        known.insert(derived.output.as_str());
    }

    for rule in &def.classifications {
        for case in &rule.cases {
            for field in case.when.fields() {
                require(&known, field, &format!("classification '{}'", rule.output))?;
            }
        }
        known.insert(rule.output.as_str());
    }

    if let Some(filter) = &def.selection.filter {
        for field in filter.fields() {
            require(&known, field, "selection filter")?;
        }
    }
    for item in &def.selection.order_by {
        require(&known, &item.field, "selection order key")?;
    }

    if let Some(aggregation) = &def.aggregation {
        for field in aggregation.measures.iter().chain(aggregation.example_field.iter()) {
            require(&known, field, "aggregation")?;
        }
    }

    Ok(())
}
