//! Command line tool to inspect, difference and quality check
//! POSPac trajectories.
//! Refer to README for command line arguments.

mod cli; // command line interface
mod fops;
mod progress;
mod qc;

use cli::Cli;

use env_logger::{Builder, Target};

#[macro_use]
extern crate log;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    StdioError(#[from] std::io::Error),
    #[error("{0}")]
    PospacError(#[from] pospac::prelude::Error),
    #[error("invalid configuration: {0}")]
    ConfigError(#[from] serde_json::Error),
    #[error("invalid progress bar template: {0}")]
    ProgressTemplateError(#[from] indicatif::style::TemplateError),
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let quiet = cli.quiet();

    match cli.matches.subcommand() {
        Some(("info", submatches)) => fops::info(submatches)?,
        Some(("navdif", submatches)) => fops::navdif(submatches, quiet)?,
        Some(("qc", submatches)) => qc::qc(submatches, quiet)?,
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
} // main
