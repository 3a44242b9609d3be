//! Automated quality check
use std::path::PathBuf;

use clap::ArgMatches;

use pospac::prelude::{Project, QcReport};

use crate::{cli::qc_config, fops::required, progress::percentage_bar, Error};

pub fn qc(matches: &ArgMatches, quiet: bool) -> Result<(), Error> {
    let cfg = qc_config(matches)?;
    let project = Project::open(required::<PathBuf>(matches, "project"), cfg.version)?;
    debug!("{}", project);

    let reference = matches.get_one::<PathBuf>("reference");
    if reference.is_none() {
        info!("no reference trajectory: realtime difference is skipped");
    }

    let pb = percentage_bar("realtime difference", quiet || reference.is_none())?;
    let progress = |pct: f64| pb.set_position(pct.round() as u64);

    let report = QcReport::new(
        &project,
        reference.map(|path| path.as_path()),
        &cfg,
        Some(&progress),
    );
    pb.finish_and_clear();

    println!("{}", report);

    if !report.is_complete() {
        warn!(
            "\"{}\": {} section(s) could not be checked",
            project.name(),
            report.errors().len()
        );
    }

    Ok(())
}
