//! Solution status
use std::collections::BTreeMap;

use log::warn;
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

use crate::{
    prelude::{Error, RecordFile},
    qc::{section_header, QcConfig, QcTolerances, Statistic},
    record::FIRST_INDEX,
};

/// Status file fields: time, number of satellites, PDOP,
/// baseline length (m), processing mode.
const FIELDS: [usize; 5] = [1, 2, 3, 4, 5];

/// GNSS [ProcessingMode], as reported in the status file
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum ProcessingMode {
    #[strum(to_string = "Fixed NL")]
    FixedNarrowLane = 0,
    #[strum(to_string = "Fixed WL")]
    FixedWideLane = 1,
    #[strum(to_string = "Float")]
    Float = 2,
    #[strum(to_string = "DGPS")]
    Dgps = 3,
    #[strum(to_string = "RTCM")]
    Rtcm = 4,
    #[strum(to_string = "IAPPP")]
    Iappp = 5,
    #[strum(to_string = "C/A")]
    CoarseAcquisition = 6,
    #[strum(to_string = "GNSS")]
    Gnss = 7,
    #[strum(to_string = "DR")]
    DeadReckoning = 8,
}

impl ProcessingMode {
    /// Decodes the status file value
    pub fn from_value(value: f64) -> Option<Self> {
        if value.fract() != 0.0 || !(0.0..=u8::MAX as f64).contains(&value) {
            return None;
        }
        Self::from_repr(value as u8)
    }

    /// True for both fixed ambiguity modes
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::FixedNarrowLane | Self::FixedWideLane)
    }

    /// Time spent (s) in a degraded mode worth reporting
    fn reporting_threshold(&self) -> f64 {
        match self {
            Self::FixedNarrowLane | Self::FixedWideLane => 0.0,
            Self::Float => 60.0,
            Self::Dgps | Self::Rtcm => 5.0,
            _ => 1.0,
        }
    }
}

/// GNSS [SolutionStatus] over the whole project
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionStatus {
    /// Lowest number of satellites in sight
    pub min_sv: f64,
    /// Time spent (s) with too few satellites
    pub sv_out_of_tolerance: f64,
    /// Highest PDOP
    pub max_pdop: f64,
    /// Time spent (s) above PDOP tolerance
    pub pdop_out_of_tolerance: f64,
    /// Longest baseline (m)
    pub max_baseline: f64,
    /// Time spent (s) in each [ProcessingMode]
    pub modes: BTreeMap<ProcessingMode, f64>,
    tolerances: QcTolerances,
}

impl SolutionStatus {
    pub fn from_file(file: &RecordFile, cfg: &QcConfig) -> Result<Self, Error> {
        let records = (FIRST_INDEX..=file.records()).collect::<Vec<_>>();
        let data = file.block(&records, &FIELDS)?;

        let period = file.time_inc();
        let tol = cfg.tolerances;

        let sv = Statistic::from_column(&data, 1);
        let pdop = Statistic::from_column(&data, 2);
        let baseline = Statistic::from_column(&data, 3);

        let sv_out_of_tolerance =
            data.column(1).iter().filter(|sv| **sv <= tol.sv_count).count() as f64 * period;

        let pdop_out_of_tolerance =
            data.column(2).iter().filter(|pdop| **pdop > tol.pdop).count() as f64 * period;

        let mut modes = BTreeMap::<ProcessingMode, f64>::new();
        for value in data.column(4).iter() {
            match ProcessingMode::from_value(*value) {
                Some(mode) => *modes.entry(mode).or_insert(0.0) += period,
                None => warn!("{}: unknown processing mode {}", file.path().display(), value),
            }
        }

        Ok(Self {
            min_sv: sv.min,
            sv_out_of_tolerance,
            max_pdop: pdop.max,
            pdop_out_of_tolerance,
            max_baseline: baseline.max,
            modes,
            tolerances: tol,
        })
    }

    /// Time spent (s) in given [ProcessingMode]
    pub fn time_in(&self, mode: ProcessingMode) -> f64 {
        self.modes.get(&mode).copied().unwrap_or(0.0)
    }

    /// Time spent (s) with fixed ambiguities
    pub fn fixed_time(&self) -> f64 {
        self.modes
            .iter()
            .filter_map(|(mode, time)| if mode.is_fixed() { Some(time) } else { None })
            .sum()
    }
}

fn minutes(seconds: f64) -> f64 {
    (seconds / 60.0 * 10.0).round() / 10.0
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        section_header(f, "Solution Status")?;
        let tol = &self.tolerances;

        if self.min_sv <= tol.sv_count {
            writeln!(
                f,
                "Min # SVs:    {} (out of tolerance for {} minutes)",
                self.min_sv,
                minutes(self.sv_out_of_tolerance)
            )?;
        } else {
            writeln!(f, "Min # SVs:    {}", self.min_sv)?;
        }

        if self.max_pdop > tol.pdop {
            writeln!(
                f,
                "Max PDOP:     {:.2} (out of tolerance for {} minutes)",
                self.max_pdop,
                minutes(self.pdop_out_of_tolerance)
            )?;
        } else {
            writeln!(f, "Max PDOP:     {:.2}", self.max_pdop)?;
        }

        if self.max_baseline > tol.baseline {
            writeln!(f, "Max Baseline: {:.0} m (out of tolerance)", self.max_baseline)?;
        } else {
            writeln!(f, "Max Baseline: {:.0} m", self.max_baseline)?;
        }

        writeln!(f)?;
        writeln!(f, "Processing Mode:")?;
        writeln!(
            f,
            "\tFixed NL/WL (0/1):\t{} minutes",
            minutes(self.fixed_time())
        )?;

        for mode in ProcessingMode::iter().filter(|mode| !mode.is_fixed()) {
            let time = self.time_in(mode);
            if time > mode.reporting_threshold() {
                writeln!(
                    f,
                    "\t{} Mode ({}):\t{} minutes",
                    mode,
                    mode as u8,
                    minutes(time)
                )?;
            }
        }
        Ok(())
    }
}
