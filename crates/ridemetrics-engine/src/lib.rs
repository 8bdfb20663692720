//! Ranking & tiering engine for ride-share trip metrics
//!
//! Partitions a batch of records, orders each partition, evaluates window
//! functions (ranks, percentiles, quantile buckets, lead/lag and positional
//! values), derives per-row deltas, classifies rows into named tiers and
//! optionally rolls the tiers up into group summaries.
//!
//! ```no_run
//! use ridemetrics_engine::{reports, RankingEngine};
//! use ridemetrics_types::{Record, Schema, ValueType};
//!
//! let schema = Schema::new()
//!     .with_field("driver_name", ValueType::Text)
//!     .with_field("total_rides", ValueType::Integer)
//!     .with_field("total_revenue", ValueType::Numeric);
//! let records = vec![
//!     Record::new().with("driver_name", "D-01").with("total_rides", 120).with("total_revenue", 2400.0),
//! ];
//!
//! let engine = RankingEngine::new(reports::revenue_tiers())?;
//! let output = engine.run(&schema, &records)?;
//! for row in &output.rows {
//!     println!("{:?} {:?}", row.get("driver_name"), row.label("performance_tier"));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod classify;
pub mod definition;
pub mod derive;
pub mod engine;
pub mod errors;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod record;
pub mod reports;
pub mod select;
pub mod window;

pub use aggregate::{GroupSummary, MeasureSummary};
pub use definition::{
    AggregateKind, AggregationSpec, ClassificationCase, ClassificationRule, CompareOp, Derivation,
    DerivedField, NullPlacement, OrderByItem, Predicate, ReportDefinition, SelectionSpec, SortDirection,
    WindowFunction, WindowFunctionSpec,
};
pub use engine::{EngineOptions, RankingEngine, ReportOutput};
pub use errors::{ConfigurationError, EngineError, EngineWarning};
pub use record::{AnnotatedRecord, CategorizedRecord};
