// navdif opmode
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

pub fn subcommand() -> Command {
    Command::new("navdif")
        .arg_required_else_help(true)
        .about(
            "Solution - Reference trajectory difference.
Both trajectories are compared every --step seconds over the time window
they share. Differences are stored as a 14 field record file.",
        )
        .arg(
            Arg::new("solution")
                .short('s')
                .long("solution")
                .value_name("FILEPATH")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Solution trajectory"),
        )
        .arg(
            Arg::new("reference")
                .short('r')
                .long("reference")
                .value_name("FILEPATH")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Reference trajectory"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILEPATH")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("NAVDIF file to produce"),
        )
        .next_help_heading("Preferences")
        .arg(
            Arg::new("fields")
                .long("fields")
                .short('n')
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("17")
                .help("Number of fields per record, of both trajectories"),
        )
        .arg(
            Arg::new("step")
                .long("step")
                .value_name("SECONDS")
                .value_parser(value_parser!(u32))
                .default_value("5")
                .help("Epoch step"),
        )
        .arg(
            Arg::new("interpolate")
                .long("interpolate")
                .short('i')
                .action(ArgAction::SetTrue)
                .help("Interpolate both trajectories rather than picking the closest records"),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .short('j')
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("1")
                .help("Number of worker threads"),
        )
}
