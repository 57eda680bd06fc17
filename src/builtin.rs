//! Embedded `ALERT_CREATED` schema and sample payload

use crate::schema::{Schema, SchemaError, SchemaErrorKind, compile};
use serde_json::Value;

/// Schema for the `ALERT_CREATED` incident notification
pub const ALERT_CREATED_SCHEMA: &str = include_str!("../docs/alert_created.schema.json");

/// A payload that satisfies [`ALERT_CREATED_SCHEMA`]
pub const ALERT_CREATED_SAMPLE: &str = include_str!("../docs/alert_created.sample.json");

/// Display name of the sample in status lines
pub const SAMPLE_NAME: &str = "builtin SAMPLE";

/// Parse the embedded schema document
///
/// # Errors
///
/// Returns an error if the embedded text is not valid JSON.
#[inline]
pub fn alert_schema_document() -> Result<Value, SchemaError> {
    parse_embedded(ALERT_CREATED_SCHEMA)
}

/// Compile the embedded schema in strict mode
///
/// # Errors
///
/// Returns an error if the embedded schema fails to parse or compile.
#[inline]
pub fn alert_schema() -> Result<Schema, SchemaError> {
    compile(&alert_schema_document()?)
}

/// Parse the embedded sample payload
///
/// # Errors
///
/// Returns an error if the embedded text is not valid JSON.
#[inline]
pub fn alert_sample() -> Result<Value, serde_json::Error> {
    serde_json::from_str(ALERT_CREATED_SAMPLE)
}

fn parse_embedded(text: &str) -> Result<Value, SchemaError> {
    serde_json::from_str(text).map_err(|e| {
        SchemaError::new("", SchemaErrorKind::Syntax {
            message: format!("embedded schema: {e}"),
        })
    })
}
