//! Smoothed performance metrics (post processed accuracy)
use log::warn;

use crate::{
    prelude::{Error, RecordFile},
    qc::{flag, section_header, QcConfig, QcTolerances, Statistic},
};

/// Accuracy file fields: time, North/East/Down position RMS (m),
/// roll/pitch/heading RMS (arc-min).
const FIELDS: [usize; 7] = [1, 2, 3, 4, 8, 9, 10];

/// Post processed accuracy [Performance]
#[derive(Debug, Clone, PartialEq)]
pub struct Performance {
    pub north: Statistic,
    pub east: Statistic,
    pub down: Statistic,
    pub roll: Statistic,
    pub pitch: Statistic,
    pub heading: Statistic,
    tolerances: QcTolerances,
}

impl Performance {
    /// Analyzes the accuracy file, leaving out the blanking period
    /// at both ends, where the solution is still converging.
    pub fn from_file(file: &RecordFile, cfg: &QcConfig) -> Result<Self, Error> {
        let mut first = file.start_time() + cfg.rms_blanking;
        let mut last = file.end_time() - cfg.rms_blanking;

        if first >= last {
            warn!(
                "{}: too short for {}s blanking, analyzing the whole file",
                file.path().display(),
                cfg.rms_blanking
            );
            first = file.start_time();
            last = file.end_time();
        }

        let first = file.nearest_record(first)?;
        let last = file.nearest_record(last)?;

        let records = (first..=last)
            .step_by(cfg.rms_decimation.max(1))
            .collect::<Vec<_>>();

        let data = file.block(&records, &FIELDS)?;

        Ok(Self {
            north: Statistic::from_column(&data, 1),
            east: Statistic::from_column(&data, 2),
            down: Statistic::from_column(&data, 3),
            roll: Statistic::from_column(&data, 4),
            pitch: Statistic::from_column(&data, 5),
            heading: Statistic::from_column(&data, 6),
            tolerances: cfg.tolerances,
        })
    }

    /// True when all maximal RMS are within tolerances
    pub fn within_tolerances(&self) -> bool {
        let tol = &self.tolerances;
        self.north.max < tol.rms_north
            && self.east.max < tol.rms_east
            && self.down.max < tol.rms_down
            && self.roll.max < tol.rms_roll
            && self.pitch.max < tol.rms_pitch
            && self.heading.max < tol.rms_heading
    }
}

impl std::fmt::Display for Performance {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        section_header(f, "Smoothed Performance Metrics")?;
        let tol = &self.tolerances;
        writeln!(f, "\tMax\t(StDev) - Tolerance")?;
        for (label, stat, tolerance, unit) in [
            ("North", &self.north, tol.rms_north, "m"),
            ("East", &self.east, tol.rms_east, "m"),
            ("Down", &self.down, tol.rms_down, "m"),
            ("Roll", &self.roll, tol.rms_roll, "arc-min"),
            ("Pitch", &self.pitch, tol.rms_pitch, "arc-min"),
            ("Heading", &self.heading, tol.rms_heading, "arc-min"),
        ] {
            writeln!(
                f,
                "{}:\t{:.3}\t({:.3}) - {} {}{}",
                label,
                stat.max,
                stat.std_dev,
                tolerance,
                unit,
                flag(stat.max < tolerance)
            )?;
        }
        Ok(())
    }
}
