//! Loading schema and candidate documents through the System trait

use crate::builtin;
use crate::error::CheckError;
use crate::schema::{CompileOptions, Schema, compile_with};
use crate::system::System;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Whether `path` names a YAML document
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Whether `path` names a JSON document
#[must_use]
#[inline]
pub fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read the schema document from `path`, or the embedded one when `None`
///
/// Files ending in `.yaml`/`.yml` are parsed as YAML, everything else as JSON.
///
/// # Errors
///
/// Returns a schema error if the file cannot be read or parsed.
#[inline]
pub fn load_schema_document(system: &dyn System, path: Option<&Path>) -> Result<Value, CheckError> {
    let Some(path) = path else {
        debug!("Using embedded ALERT_CREATED schema");
        return builtin::alert_schema_document().map_err(|e| CheckError::schema(e.to_string()));
    };

    debug!("Loading schema from {}", path.display());
    let content = system.read_to_string(path).map_err(|e| {
        CheckError::schema(format!("Failed to read schema file {}: {e}", path.display()))
    })?;

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| {
            CheckError::schema(format!("Failed to parse YAML schema {}: {e}", path.display()))
        })
    } else {
        serde_json::from_str(&content).map_err(|e| {
            CheckError::schema(format!("Failed to parse JSON schema {}: {e}", path.display()))
        })
    }
}

/// Load and compile the effective schema
///
/// # Errors
///
/// Returns a schema error if the document cannot be loaded or compiled.
#[inline]
pub fn load_schema(
    system: &dyn System,
    path: Option<&Path>,
    options: CompileOptions,
) -> Result<Schema, CheckError> {
    let document = load_schema_document(system, path)?;
    compile_with(&document, options)
        .map_err(|e| CheckError::schema(format!("Schema compilation failed: {e}")))
}

/// Read and parse one candidate JSON document
///
/// # Errors
///
/// Returns an input error if the file cannot be read or is not valid JSON.
#[inline]
pub fn load_document(system: &dyn System, path: &Path) -> Result<Value, CheckError> {
    let content = system.read_to_string(path).map_err(|e| {
        CheckError::input(format!("Failed to load JSON from {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        CheckError::input(format!("Failed to load JSON from {}: {e}", path.display()))
    })
}
