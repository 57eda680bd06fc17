//! # `alertcheck`
//!
//! Validates `ALERT_CREATED` incident notifications against their JSON schema.
//!
//! ## Usage
//!
//! ```sh
//! alertcheck                      # built-in sample + ./rich.json if present
//! alertcheck foo.json inbox/      # plus the given files and directories
//! alertcheck --schema other.yaml  # validate against another schema
//! ```
//!
//! Exit codes: 0 when every document validates, 1 when any document fails,
//! 2 when the schema cannot be loaded or compiled, 3 when an input cannot be
//! read or parsed.

use alertcheck::cli::Args;
use alertcheck::error::CheckError;
use alertcheck::system::real::RealSystem;
use anyhow::Result;
use clap::Parser as _;
use std::io::{self, Write as _};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the status lines
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let system = RealSystem::new();
    let mut stdout = io::stdout().lock();

    let result = if args.print_schema {
        alertcheck::run_print_schema(&args, &system, &mut stdout)
    } else {
        alertcheck::run(&args, &system, &mut stdout)
    };
    let _ = stdout.flush();

    match result {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{}", err);
            std::process::exit(
                err.downcast_ref::<CheckError>()
                    .map_or(1, CheckError::exit_code),
            );
        }
    }
}
