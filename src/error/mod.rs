//! Error handling module
//!
//! Defines run-level error types with exit codes. Schema and validation
//! errors live next to the code that raises them.

pub mod types;

pub use crate::schema::SchemaError;
pub use crate::validate::ValidationError;
pub use types::*;
