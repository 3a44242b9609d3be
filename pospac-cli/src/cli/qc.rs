// qc opmode
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;

pub fn subcommand() -> Command {
    Command::new("qc")
        .arg_required_else_help(true)
        .about(
            "Automated quality check of a processed POSPac project.
Analyzes the post processed accuracy, the calibrated installation parameters
and the GNSS solution status. When a reference trajectory is provided,
it is also differenced against the real-time navigation solution.",
        )
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("FILEPATH")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Project (*.pospac) file"),
        )
        .arg(
            Arg::new("reference")
                .short('r')
                .long("reference")
                .value_name("FILEPATH")
                .value_parser(value_parser!(PathBuf))
                .help("Reference (smoothed) trajectory"),
        )
        .next_help_heading("Preferences")
        .arg(
            Arg::new("cfg")
                .short('c')
                .long("cfg")
                .value_name("FILEPATH")
                .value_parser(value_parser!(PathBuf))
                .help("Quality check configuration (JSON). See --help for more information.")
                .long_help(
                    "Quality check configuration, as JSON. Omitted fields keep their default value.
Example:
{
    \"version\": \"V54\",
    \"rms_blanking\": 60.0,
    \"navdif\": { \"step\": 1, \"workers\": 4 },
    \"tolerances\": { \"pdop\": 4.0 }
}",
                ),
        )
        .arg(
            Arg::new("pospac")
                .long("pospac")
                .value_name("VERSION")
                .value_parser(value_parser!(String))
                .help("POSPac version that produced the project: \"5.4 SP1\", \"5.4\" or \"legacy\""),
        )
}
