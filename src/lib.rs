//! RideMetrics - ranking and tiering engine for ride-share trip analytics
//!
//! This is the root crate that re-exports all components.

pub use ridemetrics_engine as engine;
pub use ridemetrics_types as types;

pub use ridemetrics_engine::{reports, RankingEngine, ReportDefinition, ReportOutput};
pub use ridemetrics_types::{Record, Schema, Value, ValueType};
