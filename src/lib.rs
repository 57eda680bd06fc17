//! `alertcheck` - validate `ALERT_CREATED` incident notifications
//!
//! This library provides a small JSON Schema (draft-07 subset) engine: a
//! compiler that turns a schema document into an immutable [`Schema`], and a
//! validator that reports the first violation of a candidate value. The
//! command-line glue around it checks the built-in sample and any JSON files
//! given on the command line.

pub mod builtin;
pub mod cli;
pub mod error;
pub mod operations;
pub mod schema;
pub mod system;
pub mod validate;

pub use schema::{CompileOptions, Schema, SchemaError, compile, compile_with};
pub use validate::{ValidationError, Violation, validate};

use anyhow::Result;
use cli::Args;
use error::CheckError;
use operations::check::CheckOperation;
use operations::load::{load_schema, load_schema_document};
use std::io::Write;
use system::System;

/// Main entry point for the alertcheck library
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded, an input cannot be
/// loaded, or any document fails validation (`CheckError::Validation`).
pub fn run(args: &Args, system: &dyn System, out: &mut dyn Write) -> Result<()> {
    let schema = load_schema(system, args.schema.as_deref(), args.compile_options())
        .map_err(|err| fatal(err, out))?;
    let operation = CheckOperation::new(schema, args.check_options(), system);
    let summary = operation.execute(out)?;

    if summary.is_success() {
        Ok(())
    } else {
        Err(CheckError::Validation {
            failed: summary.failed,
            total: summary.total(),
        }
        .into())
    }
}

/// Print the effective schema document after checking that it compiles
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or compiled.
pub fn run_print_schema(args: &Args, system: &dyn System, out: &mut dyn Write) -> Result<()> {
    let document =
        load_schema_document(system, args.schema.as_deref()).map_err(|err| fatal(err, out))?;
    compile_with(&document, args.compile_options())
        .map_err(|e| fatal(CheckError::schema(format!("Schema compilation failed: {e}")), out))?;

    // Output to stdout (not using logging)
    writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
    Ok(())
}

/// Echo a run-ending error as an `[x]` status line before returning it
pub(crate) fn fatal(err: CheckError, out: &mut dyn Write) -> CheckError {
    if let Some(detail) = err.detail() {
        let _ = writeln!(out, "[x] {detail}");
    }
    err
}
