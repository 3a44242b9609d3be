//! Quality check report synthesis
use std::path::Path;

use log::{error, info};

use crate::{
    detection::detect_fields,
    navdif::Progress,
    prelude::{Error, RecordFile},
    project::{Area, Project, Version},
    qc::{Calibration, NavdifStatistics, Performance, QcConfig, SolutionStatus},
};

/// Prefix of the NAVDIF file produced by the quality check
pub const QC_NAVDIF_PREFIX: &str = "autoqc_navdif_bet";

/// Post processed accuracy file prefix
const ACCURACY_PREFIX: &str = "smrmsg";

/// Calibrated installation parameters file prefix
const CALIBRATION_PREFIX: &str = "iincal";

/// Real-time navigation file prefix
const REALTIME_PREFIX: &str = "vnav";

/// Reference trajectory prefix, also defining its layout
const REFERENCE_PREFIX: &str = "sbet";

/// Quality check report of a [Project]
#[derive(Debug)]
pub struct QcReport {
    /// Project name
    pub name: String,
    pub performance: Result<Performance, Error>,
    pub calibration: Result<Calibration, Error>,
    pub status: Result<SolutionStatus, Error>,
    /// Only when a reference trajectory was provided
    pub navdif: Option<Result<NavdifStatistics, Error>>,
}

impl QcReport {
    /// Runs the quality check of `project`. When a `reference` trajectory
    /// is provided, it is differenced against the real-time navigation
    /// solution and the result is stored in the processing area.
    pub fn new(
        project: &Project,
        reference: Option<&Path>,
        cfg: &QcConfig,
        progress: Option<Progress>,
    ) -> Self {
        info!("quality check of \"{}\"", project.name());

        let performance = project
            .processed(ACCURACY_PREFIX)
            .and_then(|file| Performance::from_file(&file, cfg));

        let calibration = project
            .processed(CALIBRATION_PREFIX)
            .and_then(|file| Calibration::from_file(&file, cfg));

        let status = project
            .processed(Self::status_prefix(project))
            .and_then(|file| SolutionStatus::from_file(&file, cfg));

        let navdif = reference.map(|reference| Self::navdif(project, reference, cfg, progress));

        let s = Self {
            name: project.name().to_string(),
            performance,
            calibration,
            status,
            navdif,
        };

        for e in s.errors() {
            error!("{}: {}", s.name, e);
        }

        s
    }

    /// Solution status files were renamed in 5.4
    fn status_prefix(project: &Project) -> &'static str {
        match project.version() {
            Version::Legacy => "iinotfu",
            _ => "iinkaru",
        }
    }

    fn navdif(
        project: &Project,
        reference: &Path,
        cfg: &QcConfig,
        progress: Option<Progress>,
    ) -> Result<NavdifStatistics, Error> {
        let smoothed = match project.expected_field_count(REFERENCE_PREFIX) {
            Some(fields) => RecordFile::open(reference, fields)?,
            None => detect_fields(reference)?,
        };
        let realtime = project.extracted(REALTIME_PREFIX)?;

        let output = project.resolve_path(QC_NAVDIF_PREFIX, Area::Processed);

        NavdifStatistics::run(&smoothed, &realtime, output, cfg, progress)
    }

    /// Errors encountered while synthesizing this report
    pub fn errors(&self) -> Vec<&Error> {
        let mut errors = Vec::new();
        if let Err(e) = &self.performance {
            errors.push(e);
        }
        if let Err(e) = &self.calibration {
            errors.push(e);
        }
        if let Err(e) = &self.status {
            errors.push(e);
        }
        if let Some(Err(e)) = &self.navdif {
            errors.push(e);
        }
        errors
    }

    /// True when every section could be computed
    pub fn is_complete(&self) -> bool {
        self.errors().is_empty()
    }
}

/// Failed section rendition
fn section_failure(
    f: &mut std::fmt::Formatter,
    title: &str,
    e: &Error,
) -> std::fmt::Result {
    crate::qc::section_header(f, title)?;
    writeln!(f, "Unavailable: {}", e)
}

impl std::fmt::Display for QcReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Processing {}", self.name)?;
        match &self.performance {
            Ok(section) => write!(f, "{}", section)?,
            Err(e) => section_failure(f, "Smoothed Performance Metrics", e)?,
        }
        match &self.calibration {
            Ok(section) => write!(f, "{}", section)?,
            Err(e) => section_failure(f, "Calibration Installation Parameters", e)?,
        }
        match &self.status {
            Ok(section) => write!(f, "{}", section)?,
            Err(e) => section_failure(f, "Solution Status", e)?,
        }
        match &self.navdif {
            Some(Ok(section)) => write!(f, "{}", section)?,
            Some(Err(e)) => {
                section_failure(f, "Smoothed-Reference Data (Realtime Difference)", e)?
            },
            None => {},
        }
        Ok(())
    }
}
