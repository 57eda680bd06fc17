//! Check operation coordination

use crate::builtin;
use crate::error::CheckError;
use crate::operations::load::{is_json, load_document};
use crate::schema::Schema;
use crate::system::System;
use anyhow::{Context as _, Result};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What a check run validates besides the explicit inputs
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Validate the embedded sample payload first
    pub include_sample: bool,

    /// Extra document validated when it exists
    pub rich: Option<PathBuf>,

    /// Files or directories given on the command line
    pub inputs: Vec<String>,
}

/// Counts collected over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    /// Number of documents validated
    #[must_use]
    #[inline]
    pub const fn total(&self) -> usize {
        self.passed + self.failed
    }

    #[must_use]
    #[inline]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Validates every requested document against one compiled schema
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "CheckOperation")]
pub struct CheckOperation<'src> {
    schema: Schema,
    options: CheckOptions,
    system: &'src dyn System,
}

impl<'src> CheckOperation<'src> {
    #[must_use]
    #[inline]
    pub const fn new(schema: Schema, options: CheckOptions, system: &'src dyn System) -> Self {
        Self {
            schema,
            options,
            system,
        }
    }

    /// Run the check, writing one status line per document to `out`
    ///
    /// Documents are processed in order: the sample, the rich document, then
    /// each input. A document that cannot be loaded stops the run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An input document cannot be read or parsed (`CheckError::Input`)
    /// - A directory input cannot be walked
    /// - Writing to `out` fails
    #[inline]
    pub fn execute(&self, out: &mut dyn Write) -> Result<Summary> {
        let mut summary = Summary::default();

        if self.options.include_sample {
            let sample = builtin::alert_sample().context("Embedded sample is not valid JSON")?;
            self.report(&sample, builtin::SAMPLE_NAME, &mut summary, out)?;
        }

        if let Some(rich) = self.options.rich.as_deref() {
            if self.system.is_file(rich) {
                self.check_file(rich, &mut summary, out)?;
            } else {
                debug!("No rich document at {}", rich.display());
            }
        }

        for input in &self.options.inputs {
            let path = Path::new(input);
            if self.system.is_dir(path) {
                self.check_dir(path, &mut summary, out)?;
            } else if is_json(path) && self.system.exists(path) {
                self.check_file(path, &mut summary, out)?;
            } else {
                writeln!(out, "[i] Skipping non-JSON or missing file: {input}")?;
                summary.skipped += 1;
            }
        }

        debug!(
            "Checked {} document(s): {} passed, {} failed, {} skipped",
            summary.total(),
            summary.passed,
            summary.failed,
            summary.skipped
        );
        Ok(summary)
    }

    fn check_dir(&self, dir: &Path, summary: &mut Summary, out: &mut dyn Write) -> Result<()> {
        debug!("Walking {}", dir.display());
        let entries = self
            .system
            .walk_dir(dir)
            .map_err(|e| {
                crate::fatal(
                    CheckError::input(format!("Failed to walk {}: {e}", dir.display())),
                    out,
                )
            })?;

        let mut files: Vec<PathBuf> = entries
            .into_iter()
            .filter(|entry| entry.is_file && is_json(&entry.path))
            .map(|entry| entry.path)
            .collect();
        files.sort();

        if files.is_empty() {
            writeln!(out, "[i] No JSON files found in {}", dir.display())?;
        }
        for file in &files {
            self.check_file(file, summary, out)?;
        }
        Ok(())
    }

    fn check_file(&self, path: &Path, summary: &mut Summary, out: &mut dyn Write) -> Result<()> {
        debug!("Loading {}", path.display());
        let document = load_document(self.system, path).map_err(|err| crate::fatal(err, out))?;
        self.report(&document, &path.display().to_string(), summary, out)
    }

    fn report(
        &self,
        document: &Value,
        name: &str,
        summary: &mut Summary,
        out: &mut dyn Write,
    ) -> Result<()> {
        match self.schema.validate(document) {
            Ok(()) => {
                writeln!(out, "[ok] {name} ✓")?;
                summary.passed += 1;
            }
            Err(err) => {
                writeln!(out, "[!] {name} ✗")?;
                writeln!(out, "    {err}")?;
                summary.failed += 1;
            }
        }
        Ok(())
    }
}
