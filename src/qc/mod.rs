//! Automated quality check of a processed project.
//!
//! Each section of the [QcReport] is computed from the record files of the
//! project and rendered as plain text. A section that can't be computed
//! reports its own error and does not prevent the others.
use itertools::Itertools;
use nalgebra::DMatrix;
use statrs::statistics::Statistics;

mod calibration;
mod cfg;
mod navdif;
mod performance;
mod report;
mod status;

pub use calibration::Calibration;
pub use cfg::{QcConfig, QcNavdifOpts, QcTolerances};
pub use navdif::NavdifStatistics;
pub use performance::Performance;
pub use report::QcReport;
pub use status::{ProcessingMode, SolutionStatus};

/// Statistical summary of a single quantity
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Statistic {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl Statistic {
    /// [Statistic] of a serie of values
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            min: Statistics::min(values),
            max: Statistics::max(values),
            mean: Statistics::mean(values),
            std_dev: Statistics::population_std_dev(values),
        }
    }

    /// [Statistic] of given column of a data block
    pub fn from_column(data: &DMatrix<f64>, column: usize) -> Self {
        let values = data.column(column).iter().copied().collect_vec();
        Self::from_values(&values)
    }
}

/// Section title, as printed in the report
pub(crate) fn section_header(f: &mut std::fmt::Formatter, title: &str) -> std::fmt::Result {
    writeln!(f, "{}", "_".repeat(80))?;
    writeln!(f, "{} -", title)?;
    writeln!(f)
}

/// Tolerance flag appended to out of tolerance figures
pub(crate) fn flag(within: bool) -> &'static str {
    if within {
        ""
    } else {
        " (out of tolerance)"
    }
}
