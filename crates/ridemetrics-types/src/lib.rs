//! Ridemetrics type system
//!
//! This crate provides the data model shared by the ranking engine:
//! - Scalar values (integer, numeric, text, timestamp, NULL)
//! - Declared column types and record schemas
//! - Immutable, insertion-ordered records
//! - Schema validation errors

mod error;
mod record;
mod schema;
mod value;
mod value_type;

pub use error::SchemaError;
pub use record::{FieldLookup, Record};
pub use schema::Schema;
pub use value::Value;
pub use value_type::ValueType;
