#![doc = include_str!("../README.md")]

/*
 * POSPac is shipped under both Apache-2.0 and MIT License.
 *
 * Record files are accessed at random, one field at a time:
 * nothing is ever loaded in memory at once.
 */

pub mod detection;
pub mod geodetic;
pub mod navdif;
pub mod project;
pub mod qc;
pub mod record;
pub mod writer;

mod error;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        detection::{detect_fields, detect_fields_within},
        error::{Error, FormatError, RangeError},
        geodetic::{
            ground_speed, inverse_distance, true_heading, true_velocity, Ellipsoid, Geodesic,
        },
        navdif::{compute_differences, Difference, Layout, Navdif, Progress, Sample, Summary},
        project::{Area, Project, Version},
        qc::{QcConfig, QcReport},
        record::RecordFile,
        writer::RecordWriter,
    };
}
