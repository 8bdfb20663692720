//! Report execution
//!
//! A run goes through the stages in a fixed order:
//!
//! 1. check field references and validate records against the schema
//! 2. partition the records
//! 3. per partition: sort, evaluate window functions, derive fields, classify,
//!    then round derived fields for output
//! 4. concatenate partitions in first-appearance order
//! 5. apply the selection (filter, re-sort, limit)
//! 6. summarize by label when an aggregation is configured
//!
//! Step 3 runs on the rayon pool when the `parallel` feature is enabled and
//! there are enough partitions to be worth it.

use ridemetrics_types::{Record, Schema, Value};

use crate::{
    aggregate::{summarize, GroupSummary},
    classify::classify,
    definition::{check_field_references, validate_definition, ReportDefinition},
    derive::{evaluate_derived, round_derived},
    errors::{ConfigurationError, EngineError, EngineWarning},
    record::{AnnotatedRecord, CategorizedRecord},
    select::apply_selection,
    window::{evaluate_window_function, partition_records, sort_partition, Partition},
};

/// Per-engine execution options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Minimum partition count for parallel evaluation; `None` uses the
    /// hardware-detected default
    pub parallel_threshold: Option<usize>,
}

impl EngineOptions {
    /// Always evaluate partitions on the calling thread
    pub fn sequential() -> Self {
        EngineOptions { parallel_threshold: Some(usize::MAX) }
    }

    /// Parallelize once there are at least `threshold` partitions
    pub fn parallel_from(threshold: usize) -> Self {
        EngineOptions { parallel_threshold: Some(threshold) }
    }
}

/// Result of one report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutput {
    pub rows: Vec<CategorizedRecord>,
    pub summaries: Option<Vec<GroupSummary>>,
    pub warnings: Vec<EngineWarning>,
}

impl ReportOutput {
    /// Flattened rows, ready to feed into another run
    pub fn to_records(&self) -> Vec<Record> {
        self.rows.iter().map(CategorizedRecord::to_record).collect()
    }

    /// One field across every row, NULL where a row lacks it
    pub fn column(&self, field: &str) -> Vec<Value> {
        self.rows.iter().map(|row| row.get(field).cloned().unwrap_or(Value::Null)).collect()
    }

    /// Labels of one classification rule across every row
    pub fn labels(&self, output: &str) -> Vec<&str> {
        self.rows.iter().map(|row| row.label(output).unwrap_or_default()).collect()
    }
}

/// Evaluates one [`ReportDefinition`] against record batches
///
/// The definition is validated once at construction; each [`run`] then
/// checks it against the batch's schema before touching any record.
///
/// [`run`]: RankingEngine::run
#[derive(Debug, Clone)]
pub struct RankingEngine {
    definition: ReportDefinition,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    options: EngineOptions,
}

impl RankingEngine {
    pub fn new(definition: ReportDefinition) -> Result<Self, ConfigurationError> {
        validate_definition(&definition)?;
        Ok(RankingEngine { definition, options: EngineOptions::default() })
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn definition(&self) -> &ReportDefinition {
        &self.definition
    }

    pub fn run(&self, schema: &Schema, records: &[Record]) -> Result<ReportOutput, EngineError> {
        let def = &self.definition;

        check_field_references(def, schema)?;
        schema.validate_all(records)?;

        let mut warnings = Vec::new();
        let partitions: Vec<Partition<'_>> = partition_records(records, &def.partition_by)?
            .into_iter()
            .filter(|partition| {
                if partition.is_empty() {
                    log::warn!("Report '{}': skipping empty partition", def.name);
                    warnings.push(EngineWarning::EmptyPartition { partition_key: partition.key.clone() });
                    false
                } else {
                    true
                }
            })
            .collect();

        log::debug!(
            "Report '{}': {} records in {} partitions",
            def.name,
            records.len(),
            partitions.len()
        );

        let rows: Vec<CategorizedRecord> =
            self.evaluate_partitions(partitions)?.into_iter().flatten().collect();
        let rows = apply_selection(rows, &def.selection);

        let summaries = match &def.aggregation {
            Some(spec) => Some(summarize(&rows, spec)?),
            None => None,
        };

        log::debug!("Report '{}': {} rows selected", def.name, rows.len());

        Ok(ReportOutput { rows, summaries, warnings })
    }

    fn evaluate_partitions(
        &self,
        partitions: Vec<Partition<'_>>,
    ) -> Result<Vec<Vec<CategorizedRecord>>, EngineError> {
        #[cfg(feature = "parallel")]
        {
            if self.should_parallelize(partitions.len()) {
                use rayon::prelude::*;

                log::debug!("Evaluating {} partitions in parallel", partitions.len());
                // Collect every result first so the reported error is the
                // first failing partition in order, same as sequential
                let results: Vec<_> =
                    partitions.into_par_iter().map(|p| self.evaluate_partition(p)).collect();
                return results.into_iter().collect();
            }
        }

        partitions.into_iter().map(|p| self.evaluate_partition(p)).collect()
    }

    #[cfg(feature = "parallel")]
    fn should_parallelize(&self, partition_count: usize) -> bool {
        match self.options.parallel_threshold {
            Some(threshold) => partition_count >= threshold,
            None => crate::parallel::ParallelConfig::global().should_parallelize(partition_count),
        }
    }

    /// Sort, window, derive and classify one partition
    fn evaluate_partition(&self, mut partition: Partition<'_>) -> Result<Vec<CategorizedRecord>, EngineError> {
        let def = &self.definition;

        sort_partition(&mut partition, &def.order_by)
            .map_err(|e| EngineError::in_partition(&partition.key, e))?;

        let columns = def
            .window_functions
            .iter()
            .map(|spec| evaluate_window_function(&partition, spec))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::with_capacity(partition.len());
        for (pos, record) in partition.rows.iter().enumerate() {
            let source_index = partition.original_indices[pos];
            let mut annotated = AnnotatedRecord::new(source_index, (*record).clone());

            for (spec, column) in def.window_functions.iter().zip(&columns) {
                annotated.set_stat(&spec.output, column[pos].clone());
            }

            for derived in &def.derived_fields {
                let value = evaluate_derived(&annotated, derived, source_index)
                    .map_err(|e| EngineError::in_partition(&partition.key, e))?;
                annotated.set_stat(&derived.output, value);
            }

            let mut row = CategorizedRecord::new(annotated);
            for rule in &def.classifications {
                let label = classify(&row, rule);
                row.set_label(&rule.output, label);
            }

            // Classification saw exact derived values; rounding is for output only
            for derived in def.derived_fields.iter().filter(|d| d.round.is_some()) {
                if let Some(value) = row.annotated.stat(&derived.output).cloned() {
                    row.annotated.set_stat(&derived.output, round_derived(derived, value));
                }
            }

            rows.push(row);
        }

        Ok(rows)
    }
}
