//! Calibrated installation parameters
use crate::{
    prelude::{Error, RecordFile},
    qc::{section_header, QcConfig, Statistic},
    record::FIRST_INDEX,
};

/// Calibration file fields: time, reference to primary antenna
/// lever arm X/Y/Z (m), figure of merit.
const FIELDS: [usize; 5] = [1, 2, 3, 4, 5];

/// Converged installation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// Number of records analyzed
    pub records: usize,
    pub x: Statistic,
    pub y: Statistic,
    pub z: Statistic,
    /// Worst figure of merit
    pub figure_of_merit: f64,
}

impl Calibration {
    /// Analyzes the last records of the calibration file,
    /// where parameters should have converged.
    pub fn from_file(file: &RecordFile, cfg: &QcConfig) -> Result<Self, Error> {
        let last = file.records();
        let first = (last + FIRST_INDEX)
            .saturating_sub(cfg.calibration_records)
            .clamp(FIRST_INDEX, last);

        let records = (first..=last).collect::<Vec<_>>();
        let data = file.block(&records, &FIELDS)?;

        Ok(Self {
            records: records.len(),
            x: Statistic::from_column(&data, 1),
            y: Statistic::from_column(&data, 2),
            z: Statistic::from_column(&data, 3),
            figure_of_merit: Statistic::from_column(&data, 4).max,
        })
    }
}

impl std::fmt::Display for Calibration {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        section_header(f, "Calibration Installation Parameters")?;
        writeln!(f, "\tAvg.\t(StDev)")?;
        for (label, stat) in [
            ("X Ref Pri", &self.x),
            ("Y Ref Pri", &self.y),
            ("Z Ref Pri", &self.z),
        ] {
            writeln!(f, "{}:\t{:.3}\t({:.4})", label, stat.mean, stat.std_dev)?;
        }
        writeln!(f)?;
        writeln!(f, "Max Figure of Merit: {}", self.figure_of_merit)
    }
}
