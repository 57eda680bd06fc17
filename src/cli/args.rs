use crate::operations::check::CheckOptions;
use crate::schema::CompileOptions;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for alertcheck
#[derive(Parser, Debug, Clone)]
#[command(name = "alertcheck")]
#[command(about = "Validate ALERT_CREATED incident notifications against their JSON schema")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// JSON files or directories to validate (directories are searched for *.json)
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Schema document to use instead of the built-in ALERT_CREATED schema (JSON or YAML)
    #[arg(long, value_name = "PATH", env = "ALERTCHECK_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Extra document validated when it exists
    #[arg(long, value_name = "PATH", default_value = "rich.json")]
    pub rich: PathBuf,

    /// Do not validate the built-in sample payload
    #[arg(long)]
    pub no_sample: bool,

    /// Ignore unknown schema keywords instead of rejecting them
    #[arg(long)]
    pub lenient: bool,

    /// Print the effective schema as JSON and exit
    #[arg(long)]
    pub print_schema: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Compile options selected by the flags
    #[must_use]
    pub const fn compile_options(&self) -> CompileOptions {
        if self.lenient {
            CompileOptions::lenient()
        } else {
            CompileOptions::strict()
        }
    }

    /// Documents to validate, in the order they are reported
    #[must_use]
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            include_sample: !self.no_sample,
            rich: Some(self.rich.clone()),
            inputs: self.files.clone(),
        }
    }
}
