#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{navdif::Navdif, project::Version};

/// Tolerances a processed project is checked against
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QcTolerances {
    /// Maximal North position RMS (m)
    pub rms_north: f64,
    /// Maximal East position RMS (m)
    pub rms_east: f64,
    /// Maximal Down position RMS (m)
    pub rms_down: f64,
    /// Maximal roll RMS (arc-min)
    pub rms_roll: f64,
    /// Maximal pitch RMS (arc-min)
    pub rms_pitch: f64,
    /// Maximal heading RMS (arc-min)
    pub rms_heading: f64,
    /// Lowest acceptable number of satellites in sight
    pub sv_count: f64,
    /// Highest acceptable PDOP
    pub pdop: f64,
    /// Longest acceptable baseline (m)
    pub baseline: f64,
}

impl Default for QcTolerances {
    fn default() -> Self {
        Self {
            rms_north: 0.07,
            rms_east: 0.07,
            rms_down: 0.07,
            rms_roll: 1.2,
            rms_pitch: 1.2,
            rms_heading: 1.2,
            sv_count: 4.0,
            pdop: 3.0,
            baseline: 20_000.0,
        }
    }
}

/// NAVDIF preferences
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QcNavdifOpts {
    /// Epoch step, in seconds
    pub step: u32,
    /// Interpolate both trajectories rather than picking the nearest record
    pub interpolate: bool,
    /// Number of worker threads
    pub workers: usize,
}

impl Default for QcNavdifOpts {
    fn default() -> Self {
        Self {
            step: crate::navdif::DEFAULT_STEP,
            interpolate: false,
            workers: 1,
        }
    }
}

impl QcNavdifOpts {
    /// [Navdif] engine matching these preferences
    pub fn engine(&self) -> Navdif {
        Navdif::default()
            .with_step(self.step)
            .with_interpolation(self.interpolate)
            .with_workers(self.workers)
    }
}

/// [QcConfig] gathers every setting of the quality check.
/// It is passed explicitly to whoever needs it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QcConfig {
    /// POSPac version that produced the project
    pub version: Version,
    /// Duration (s) ignored at both ends of the accuracy file
    pub rms_blanking: f64,
    /// Accuracy file decimation, in records
    pub rms_decimation: usize,
    /// Number of (last) calibration records analyzed
    pub calibration_records: usize,
    pub navdif: QcNavdifOpts,
    pub tolerances: QcTolerances,
}

impl Default for QcConfig {
    fn default() -> Self {
        Self {
            version: Version::default(),
            rms_blanking: 60.0,
            rms_decimation: 5,
            calibration_records: 600,
            navdif: QcNavdifOpts::default(),
            tolerances: QcTolerances::default(),
        }
    }
}

impl QcConfig {
    /// Copies and returns [QcConfig] with given project [Version]
    pub fn with_version(&self, version: Version) -> Self {
        let mut s = self.clone();
        s.version = version;
        s
    }

    /// Copies and returns [QcConfig] with given NAVDIF preferences
    pub fn with_navdif(&self, navdif: QcNavdifOpts) -> Self {
        let mut s = self.clone();
        s.navdif = navdif;
        s
    }

    /// Copies and returns [QcConfig] with custom tolerances
    pub fn with_tolerances(&self, tolerances: QcTolerances) -> Self {
        let mut s = self.clone();
        s.tolerances = tolerances;
        s
    }
}
