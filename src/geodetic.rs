//! Geodesy on the reference ellipsoid and navigation frame helpers.
//!
//! All angles are expressed in radians, distances in meters.
use std::f64::consts::TAU;

use crate::prelude::Error;

/// Maximal number of iterations of the inverse solution
pub const VINCENTY_MAX_ITERATIONS: usize = 100;

/// Longitude difference convergence criterion, on the auxiliary sphere
const VINCENTY_CONVERGENCE: f64 = 1.0E-12;

/// Reference [Ellipsoid] definition
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipsoid {
    /// Semi major axis (equatorial radius) in meters
    pub a: f64,
    /// Semi minor axis (polar radius) in meters
    pub b: f64,
    /// Flattening
    pub f: f64,
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::GRS80
    }
}

impl Ellipsoid {
    /// GRS80, the ellipsoid all trajectories are expressed on
    pub const GRS80: Self = Self {
        a: 6378137.0,
        b: 6356752.31414,
        f: 1.0 / 298.257222101,
    };

    /// Vincenty inverse solution: distance and bearings between two
    /// (latitude, longitude) points on this [Ellipsoid].
    /// T. Vincenty, "Direct and Inverse Solutions of Geodesics on the
    /// Ellipsoid with application of nested equations", Survey Review,
    /// vol XXII no 176, 1975.
    ///
    /// Coincident points resolve to a null [Geodesic].
    /// Nearly antipodal points do not converge and return
    /// [Error::Convergence]: a wrong distance is never returned.
    pub fn inverse(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<Geodesic, Error> {
        let (a, b, f) = (self.a, self.b, self.f);

        let l = lon2 - lon1;

        // reduced latitudes
        let u1 = ((1.0 - f) * lat1.tan()).atan();
        let u2 = ((1.0 - f) * lat2.tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;

        for _ in 0..VINCENTY_MAX_ITERATIONS {
            let (sin_lambda, cos_lambda) = lambda.sin_cos();

            let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();

            if sin_sigma == 0.0 {
                return Ok(Geodesic::default());
            }

            let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            let sigma = sin_sigma.atan2(cos_sigma);

            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

            // equatorial line: cos²α = 0
            let cos_2sigma_m = if cos_sq_alpha == 0.0 {
                0.0
            } else {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            };

            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

            let previous = lambda;

            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

            if (lambda - previous).abs() <= VINCENTY_CONVERGENCE {
                let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);

                let big_a =
                    1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));

                let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

                let delta_sigma = big_b
                    * sin_sigma
                    * (cos_2sigma_m
                        + big_b / 4.0
                            * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                                - big_b / 6.0
                                    * cos_2sigma_m
                                    * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                    * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

                let distance = b * big_a * (sigma - delta_sigma);

                let forward_azimuth =
                    (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);

                let reverse_azimuth =
                    (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

                return Ok(Geodesic {
                    distance: round_millimeter(distance),
                    forward_azimuth,
                    reverse_azimuth,
                });
            }
        }

        Err(Error::Convergence(VINCENTY_MAX_ITERATIONS))
    }
}

/// Solution of the inverse geodetic problem
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Geodesic {
    /// Distance between both points, in meters, rounded to 1 mm
    pub distance: f64,
    /// Initial bearing, at first point (radians)
    pub forward_azimuth: f64,
    /// Final bearing, at second point (radians)
    pub reverse_azimuth: f64,
}

impl Geodesic {
    /// Decomposes this [Geodesic] into (north, east) components in meters,
    /// projected along the forward azimuth.
    pub fn north_east(&self) -> (f64, f64) {
        let (sin_az, cos_az) = self.forward_azimuth.sin_cos();
        (self.distance * cos_az, self.distance * sin_az)
    }
}

impl std::fmt::Display for Geodesic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:.3} m (az={:.6}°, raz={:.6}°)",
            self.distance,
            self.forward_azimuth.to_degrees(),
            self.reverse_azimuth.to_degrees()
        )
    }
}

/// [Ellipsoid::inverse] on [Ellipsoid::GRS80].
pub fn inverse_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<Geodesic, Error> {
    Ellipsoid::GRS80.inverse(lat1, lon1, lat2, lon2)
}

/// Rotates a velocity expressed in the wander angle frame to North, East, Down.
/// The wander angle frame is locally level but its X axis is not necessarily
/// aligned with true North. When X points North, Y points West and Z points Up.
pub fn true_velocity(vx: f64, vy: f64, vz: f64, wander_angle: f64) -> (f64, f64, f64) {
    let (sin_w, cos_w) = wander_angle.sin_cos();
    let north = vx * cos_w - vy * sin_w;
    let east = -vx * sin_w - vy * cos_w;
    (north, east, -vz)
}

/// True heading in [0, 2π[, from the (wander frame) platform heading.
pub fn true_heading(platform_heading: f64, wander_angle: f64) -> f64 {
    let heading = (platform_heading - wander_angle).rem_euclid(TAU);
    // rem_euclid may round up to 2π for tiny negative inputs
    if heading >= TAU {
        0.0
    } else {
        heading
    }
}

/// Horizontal speed in m/s
pub fn ground_speed(vx: f64, vy: f64) -> f64 {
    vx.hypot(vy)
}

pub(crate) fn round_millimeter(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
