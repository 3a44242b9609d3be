//! Trajectory layout and samples
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    geodetic::{true_heading, true_velocity},
    prelude::{Error, RangeError, RecordFile},
    record::TIME_FIELD,
};

/// [Layout] tells where each quantity of a navigation solution
/// is stored within a record (1-based field numbers).
/// Angles are expected in radians, distances in meters.
/// Timestamps are not part of the [Layout]: records are located
/// by time, which always is the first field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    pub latitude: usize,
    pub longitude: usize,
    pub altitude: usize,
    /// Velocity along X axis of the wander angle frame
    pub velocity_x: usize,
    /// Velocity along Y axis of the wander angle frame
    pub velocity_y: usize,
    /// Velocity along Z axis of the wander angle frame
    pub velocity_z: usize,
    pub roll: usize,
    pub pitch: usize,
    /// Platform heading, in the wander angle frame
    pub heading: usize,
    pub wander_angle: usize,
}

impl Default for Layout {
    /// Smoothed best estimated trajectory (SBET) layout,
    /// shared by real-time navigation files.
    fn default() -> Self {
        Self {
            latitude: 2,
            longitude: 3,
            altitude: 4,
            velocity_x: 5,
            velocity_y: 6,
            velocity_z: 7,
            roll: 8,
            pitch: 9,
            heading: 10,
            wander_angle: 11,
        }
    }
}

impl Layout {
    /// All fields described by this [Layout], in declaration order
    pub fn fields(&self) -> [usize; 10] {
        [
            self.latitude,
            self.longitude,
            self.altitude,
            self.velocity_x,
            self.velocity_y,
            self.velocity_z,
            self.roll,
            self.pitch,
            self.heading,
            self.wander_angle,
        ]
    }
}

/// Navigation solution, sampled at one epoch
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Wander angle frame velocity (x, y, z)
    pub velocity: (f64, f64, f64),
    pub roll: f64,
    pub pitch: f64,
    pub heading: f64,
    pub wander_angle: f64,
}

impl Sample {
    /// Builds a [Sample] from a complete record
    pub fn from_record(record: &[f64], layout: &Layout) -> Result<Self, Error> {
        let value = |field: usize| -> Result<f64, Error> {
            field
                .checked_sub(1)
                .and_then(|index| record.get(index))
                .copied()
                .ok_or_else(|| {
                    RangeError::Field {
                        index: field,
                        count: record.len(),
                    }
                    .into()
                })
        };
        Ok(Self {
            time: value(TIME_FIELD)?,
            latitude: value(layout.latitude)?,
            longitude: value(layout.longitude)?,
            altitude: value(layout.altitude)?,
            velocity: (
                value(layout.velocity_x)?,
                value(layout.velocity_y)?,
                value(layout.velocity_z)?,
            ),
            roll: value(layout.roll)?,
            pitch: value(layout.pitch)?,
            heading: value(layout.heading)?,
            wander_angle: value(layout.wander_angle)?,
        })
    }

    /// Samples the record closest to `t`
    pub fn nearest(file: &RecordFile, layout: &Layout, t: f64) -> Result<Self, Error> {
        let record = file.nearest_record(t)?;
        Self::from_record(&file.record(record)?, layout)
    }

    /// Interpolates every quantity at `t`.
    /// Headings are interpolated as plain values: a sample
    /// wrapping around North is not unwrapped.
    pub fn interpolated(file: &RecordFile, layout: &Layout, t: f64) -> Result<Self, Error> {
        let values = layout
            .fields()
            .iter()
            .map(|field| file.interpolate(t, *field))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            time: file.interpolate(t, TIME_FIELD)?,
            latitude: values[0],
            longitude: values[1],
            altitude: values[2],
            velocity: (values[3], values[4], values[5]),
            roll: values[6],
            pitch: values[7],
            heading: values[8],
            wander_angle: values[9],
        })
    }

    /// Velocity in the North, East, Down frame
    pub fn true_velocity(&self) -> (f64, f64, f64) {
        let (vx, vy, vz) = self.velocity;
        true_velocity(vx, vy, vz, self.wander_angle)
    }

    /// True heading in [0, 2π[
    pub fn true_heading(&self) -> f64 {
        true_heading(self.heading, self.wander_angle)
    }
}
