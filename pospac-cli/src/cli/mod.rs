use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};
use pospac::prelude::{QcConfig, Version};

use crate::Error;

mod info;
mod navdif;
mod qc;

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }

    fn command() -> Command {
        Command::new("pospac-cli")
            .version(env!("CARGO_PKG_VERSION"))
            .about("POSPac trajectory inspection, differencing and quality check")
            .long_about(
                "pospac-cli gives access to POSPac binary trajectory files.
It compares trajectories epoch by epoch (NAVDIF) and runs
the automated quality check of processed projects.",
            )
            .arg_required_else_help(true)
            .subcommand_required(true)
            .color(ColorChoice::Always)
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .global(true)
                    .action(ArgAction::SetTrue)
                    .help("Disable progress bars."),
            )
            .subcommand(info::subcommand())
            .subcommand(navdif::subcommand())
            .subcommand(qc::subcommand())
    }

    /// True when progress bars should not be displayed
    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }
}

/// Quality check configuration: either loaded from the JSON file passed
/// with --cfg, or the default one. --pospac always prevails.
pub fn qc_config(matches: &ArgMatches) -> Result<QcConfig, Error> {
    let mut cfg = match matches.get_one::<PathBuf>("cfg") {
        Some(path) => load_config(path)?,
        None => QcConfig::default(),
    };
    if let Some(version) = matches.get_one::<String>("pospac") {
        cfg = cfg.with_version(Version::from_str(version)?);
    }
    Ok(cfg)
}

fn load_config(path: &Path) -> Result<QcConfig, Error> {
    let content = read_to_string(path)?;
    let cfg: QcConfig = serde_json::from_str(&content)?;
    info!("Using custom configuration: {:#?}", cfg);
    Ok(cfg)
}
