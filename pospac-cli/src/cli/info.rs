// info opmode
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

pub fn subcommand() -> Command {
    Command::new("info")
        .arg_required_else_help(true)
        .about("Prints the summary of a record file (size, records, time span, increment).")
        .arg(
            Arg::new("file")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILEPATH")
                .action(ArgAction::Set)
                .required(true)
                .help("Record file to describe"),
        )
        .arg(
            Arg::new("fields")
                .long("fields")
                .short('n')
                .value_name("N")
                .value_parser(value_parser!(usize))
                .action(ArgAction::Set)
                .help("Number of fields per record. Detected when omitted."),
        )
        .arg(
            Arg::new("record")
                .long("record")
                .value_name("INDEX")
                .value_parser(value_parser!(usize))
                .action(ArgAction::Append)
                .help("Also prints given record (1-based). Use as many times as needed."),
        )
        .arg(
            Arg::new("time")
                .long("time")
                .value_name("SECONDS")
                .value_parser(value_parser!(f64))
                .action(ArgAction::Append)
                .help("Also prints the record closest to given time. Use as many times as needed."),
        )
}
