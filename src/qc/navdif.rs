//! Smoothed - reference trajectory differences
use std::path::{Path, PathBuf};

use crate::{
    navdif::{field, Progress, Summary, NAVDIF_FIELDS},
    prelude::{Error, RecordFile},
    qc::{section_header, QcConfig, Statistic},
    record::FIRST_INDEX,
};

/// NAVDIF statistics
#[derive(Debug, Clone, PartialEq)]
pub struct NavdifStatistics {
    /// Produced NAVDIF file
    pub path: PathBuf,
    pub summary: Summary,
    pub north: Statistic,
    pub east: Statistic,
    pub down: Statistic,
    /// Horizontal position difference
    pub radial_2d: Statistic,
    /// 3D position difference
    pub radial_3d: Statistic,
}

impl NavdifStatistics {
    /// Differences `solution` and `reference`, stores the result at `output`
    /// and analyzes it.
    pub fn run<P: AsRef<Path>>(
        solution: &RecordFile,
        reference: &RecordFile,
        output: P,
        cfg: &QcConfig,
        progress: Option<Progress>,
    ) -> Result<Self, Error> {
        let output = output.as_ref();
        let summary = cfg
            .navdif
            .engine()
            .run(solution, reference, output, progress)?;

        let navdif = RecordFile::open(output, NAVDIF_FIELDS)?;
        Self::from_file(&navdif, summary)
    }

    /// Analyzes an existing NAVDIF file
    pub fn from_file(file: &RecordFile, summary: Summary) -> Result<Self, Error> {
        let records = (FIRST_INDEX..=file.records()).collect::<Vec<_>>();
        let fields = [
            field::TIME,
            field::NORTH,
            field::EAST,
            field::DOWN,
            field::RADIAL_2D,
            field::RADIAL_3D,
        ];
        let data = file.block(&records, &fields)?;
        Ok(Self {
            path: file.path().to_path_buf(),
            summary,
            north: Statistic::from_column(&data, 1),
            east: Statistic::from_column(&data, 2),
            down: Statistic::from_column(&data, 3),
            radial_2d: Statistic::from_column(&data, 4),
            radial_3d: Statistic::from_column(&data, 5),
        })
    }
}

impl std::fmt::Display for NavdifStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        section_header(f, "Smoothed-Reference Data (Realtime Difference)")?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f, "\t\tAvg.\t(StDev)")?;
        for (label, stat) in [
            ("North Pos. Diff", &self.north),
            ("East Pos. Diff", &self.east),
            ("Down Pos. Diff", &self.down),
        ] {
            writeln!(f, "{}:\t{:.3}\t({:.3}) m", label, stat.mean, stat.std_dev)?;
        }
        writeln!(
            f,
            "Max 2D/3D Diff:\t{:.3}/{:.3} m",
            self.radial_2d.max, self.radial_3d.max
        )
    }
}
