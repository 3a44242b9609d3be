//! NAVDIF record
use crate::{
    geodetic::inverse_distance,
    navdif::Sample,
    prelude::Error,
};

/// Number of fields of a NAVDIF record
pub const NAVDIF_FIELDS: usize = 14;

/// NAVDIF record fields (1-based), as stored on disk
pub mod field {
    pub const TIME: usize = 1;
    pub const NORTH: usize = 2;
    pub const EAST: usize = 3;
    pub const DOWN: usize = 4;
    pub const VELOCITY_NORTH: usize = 5;
    pub const VELOCITY_EAST: usize = 6;
    pub const VELOCITY_DOWN: usize = 7;
    pub const ROLL: usize = 8;
    pub const PITCH: usize = 9;
    pub const HEADING: usize = 10;
    pub const RADIAL_2D: usize = 11;
    pub const RADIAL_3D: usize = 12;
    pub const VELOCITY_RADIAL_2D: usize = 13;
    pub const VELOCITY_RADIAL_3D: usize = 14;
}

/// [Difference] between a solution and a reference trajectory,
/// at one epoch. Distances in meters, velocities in m/s, angles in radians.
///
/// Sign conventions differ between quantities:
/// - position: from solution to reference (reference altitude minus solution altitude)
/// - velocity, roll and pitch: solution minus reference
/// - heading: reference minus solution, both true headings
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Difference {
    /// Epoch, in seconds
    pub time: f64,
    pub north: f64,
    pub east: f64,
    pub down: f64,
    pub velocity_north: f64,
    pub velocity_east: f64,
    pub velocity_down: f64,
    pub roll: f64,
    pub pitch: f64,
    pub heading: f64,
    /// Horizontal position difference
    pub radial_2d: f64,
    /// 3D position difference
    pub radial_3d: f64,
    /// Horizontal velocity difference
    pub velocity_radial_2d: f64,
    /// 3D velocity difference
    pub velocity_radial_3d: f64,
}

impl Difference {
    /// Computes the [Difference] between `solution` and `reference` at epoch `time`.
    /// The horizontal position difference is the geodesic between both samples,
    /// projected on North and East along its forward azimuth.
    pub fn between(time: f64, solution: &Sample, reference: &Sample) -> Result<Self, Error> {
        let geodesic = inverse_distance(
            reference.latitude,
            reference.longitude,
            solution.latitude,
            solution.longitude,
        )?;

        let (north, east) = geodesic.north_east();
        let down = reference.altitude - solution.altitude;

        let (sol_vn, sol_ve, sol_vd) = solution.true_velocity();
        let (ref_vn, ref_ve, ref_vd) = reference.true_velocity();

        let velocity_north = sol_vn - ref_vn;
        let velocity_east = sol_ve - ref_ve;
        let velocity_down = sol_vd - ref_vd;

        Ok(Self {
            time,
            north,
            east,
            down,
            velocity_north,
            velocity_east,
            velocity_down,
            roll: solution.roll - reference.roll,
            pitch: solution.pitch - reference.pitch,
            heading: reference.true_heading() - solution.true_heading(),
            radial_2d: north.hypot(east),
            radial_3d: (north.powi(2) + east.powi(2) + down.powi(2)).sqrt(),
            velocity_radial_2d: velocity_north.hypot(velocity_east),
            velocity_radial_3d: (velocity_north.powi(2)
                + velocity_east.powi(2)
                + velocity_down.powi(2))
            .sqrt(),
        })
    }

    /// Converts to an on-disk record
    pub fn to_record(&self) -> [f64; NAVDIF_FIELDS] {
        [
            self.time,
            self.north,
            self.east,
            self.down,
            self.velocity_north,
            self.velocity_east,
            self.velocity_down,
            self.roll,
            self.pitch,
            self.heading,
            self.radial_2d,
            self.radial_3d,
            self.velocity_radial_2d,
            self.velocity_radial_3d,
        ]
    }

    /// Builds a [Difference] from an on-disk record
    pub fn from_record(record: &[f64]) -> Result<Self, Error> {
        if record.len() != NAVDIF_FIELDS {
            return Err(Error::RecordLength {
                expected: NAVDIF_FIELDS,
                found: record.len(),
            });
        }
        Ok(Self {
            time: record[0],
            north: record[1],
            east: record[2],
            down: record[3],
            velocity_north: record[4],
            velocity_east: record[5],
            velocity_down: record[6],
            roll: record[7],
            pitch: record[8],
            heading: record[9],
            radial_2d: record[10],
            radial_3d: record[11],
            velocity_radial_2d: record[12],
            velocity_radial_3d: record[13],
        })
    }
}
