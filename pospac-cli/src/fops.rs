//! File operations: inspection and differencing
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use itertools::Itertools;

use pospac::{
    navdif::NAVDIF_FIELDS,
    prelude::{detect_fields, Navdif, RecordFile},
    qc::NavdifStatistics,
};

use crate::{progress::percentage_bar, Error};

/// Argument that clap guarantees, being required or defaulted
pub fn required<'a, T: Clone + Send + Sync + 'static>(matches: &'a ArgMatches, id: &str) -> &'a T {
    matches
        .get_one::<T>(id)
        .unwrap_or_else(|| panic!("--{} is either required or defaulted", id))
}

/*
 * Opens a record file, detecting its field count when not specified
 */
fn open(path: &Path, fields: Option<usize>) -> Result<RecordFile, Error> {
    let file = match fields {
        Some(fields) => RecordFile::open(path, fields)?,
        None => detect_fields(path)?,
    };
    Ok(file)
}

/// Single line rendition of a record
fn describe_record(index: usize, record: &[f64]) -> String {
    format!(
        "#{}: {}",
        index,
        record.iter().map(|value| format!("{:.9}", value)).join(" ")
    )
}

/// Prints the summary of a record file
pub fn info(matches: &ArgMatches) -> Result<(), Error> {
    let path = required::<PathBuf>(matches, "file");

    let file = open(path, matches.get_one::<usize>("fields").copied())?;
    println!("{}", file);

    if let Some(records) = matches.get_many::<usize>("record") {
        for record in records {
            println!("{}", describe_record(*record, &file.record(*record)?));
        }
    }

    if let Some(times) = matches.get_many::<f64>("time") {
        for t in times {
            let record = file.nearest_record(*t)?;
            println!("t={}s {}", t, describe_record(record, &file.record(record)?));
        }
    }

    Ok(())
}

/// Differences two trajectories, prints the statistics of the result
pub fn navdif(matches: &ArgMatches, quiet: bool) -> Result<(), Error> {
    let output = required::<PathBuf>(matches, "output");
    let fields = Some(*required::<usize>(matches, "fields"));

    let solution = open(required::<PathBuf>(matches, "solution"), fields)?;
    let reference = open(required::<PathBuf>(matches, "reference"), fields)?;

    let navdif = Navdif::default()
        .with_step(*required::<u32>(matches, "step"))
        .with_interpolation(matches.get_flag("interpolate"))
        .with_workers(*required::<usize>(matches, "workers"));

    let pb = percentage_bar("navdif", quiet)?;
    let progress = |pct: f64| pb.set_position(pct.round() as u64);

    let summary = navdif.run(&solution, &reference, output, Some(&progress))?;
    pb.finish_and_clear();

    info!("\"{}\": {}", output.display(), summary);

    let produced = RecordFile::open(output, NAVDIF_FIELDS)?;
    let statistics = NavdifStatistics::from_file(&produced, summary)?;
    println!("{}", statistics);

    Ok(())
}
