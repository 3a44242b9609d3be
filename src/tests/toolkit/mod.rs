//! Synthetic record files
use std::{
    f64::consts::TAU,
    fs::{create_dir_all, File},
    io::Write,
    path::{Path, PathBuf},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::prelude::RecordWriter;

/* NAVDIF == constant */
mod constant;
pub use constant::is_null_navdif;

/// Field count of SBET and real-time navigation files
pub const SBET_FIELDS: usize = 17;

/// Sampling [Clock] of a synthetic recording
#[derive(Debug, Clone)]
pub struct Clock {
    start: f64,
    records: usize,
    period: f64,
    drift: f64,
    jitter: f64,
    seed: u64,
}

impl Clock {
    /// Ideal clock: `records` timestamps every `period` seconds from `start`
    pub fn new(start: f64, records: usize, period: f64) -> Self {
        Self {
            start,
            records,
            period,
            drift: 0.0,
            jitter: 0.0,
            seed: 0,
        }
    }

    /// Period is stretched by `drift` (relative) over the first half
    /// of the recording, then shrunk by the same amount.
    pub fn with_drift(&self, drift: f64) -> Self {
        let mut s = self.clone();
        s.drift = drift;
        s
    }

    /// Every timestamp is offset by a random value within ±`jitter` seconds
    pub fn with_jitter(&self, jitter: f64, seed: u64) -> Self {
        let mut s = self.clone();
        s.jitter = jitter;
        s.seed = seed;
        s
    }

    pub fn timestamps(&self) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut t = self.start;
        let mut timestamps = Vec::with_capacity(self.records);
        for i in 0..self.records {
            let jitter = if self.jitter > 0.0 {
                rng.gen_range(-self.jitter..=self.jitter)
            } else {
                0.0
            };
            timestamps.push(t + jitter);
            t += if i < self.records / 2 {
                self.period * (1.0 + self.drift)
            } else {
                self.period * (1.0 - self.drift)
            };
        }
        timestamps
    }
}

/// SBET like record at time `t`: smooth motion over mid latitudes
pub fn sbet_record(t: f64) -> Vec<f64> {
    let mut record = vec![
        t,
        45.0_f64.to_radians() + 1.0E-7 * t,
        2.0_f64.to_radians() + 2.0E-7 * t,
        100.0 + 0.5 * (t / 60.0).sin(),
        5.0 + (t / 100.0).cos(),
        -2.0 + (t / 100.0).sin(),
        0.1,
        0.01 * (t / 30.0).sin(),
        0.02 * (t / 45.0).cos(),
        (0.3 + 1.0E-3 * t).rem_euclid(TAU),
        0.25,
    ];
    // accelerations and angular rates
    record.extend((0..SBET_FIELDS - record.len()).map(|i| i as f64 * 0.1));
    record
}

/// Record where field k (1-based) equals `k * t + k`,
/// the first field being `t` itself.
pub fn linear_record(t: f64, fields: usize) -> Vec<f64> {
    std::iter::once(t)
        .chain((2..=fields).map(|k| k as f64 * t + k as f64))
        .collect()
}

/// Writes all `records` at `path`
pub fn write_records<P, I>(path: P, fields: usize, records: I) -> PathBuf
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Vec<f64>>,
{
    let path = path.as_ref();
    let mut writer = RecordWriter::create(path, fields).unwrap();
    for record in records {
        writer.write_record(&record).unwrap();
    }
    writer.finish().unwrap();
    path.to_path_buf()
}

/// Writes a synthetic SBET sampled by `clock` at `path`
pub fn write_sbet<P: AsRef<Path>>(path: P, clock: &Clock) -> PathBuf {
    write_records(
        path,
        SBET_FIELDS,
        clock.timestamps().into_iter().map(sbet_record),
    )
}

/// Writes a file of `fields` linear fields sampled by `clock` at `path`
pub fn write_linear<P: AsRef<Path>>(path: P, fields: usize, clock: &Clock) -> PathBuf {
    write_records(
        path,
        fields,
        clock
            .timestamps()
            .into_iter()
            .map(|t| linear_record(t, fields)),
    )
}

/// Writes raw `bytes` at `path`
pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> PathBuf {
    let path = path.as_ref();
    let mut fd = File::create(path).unwrap();
    fd.write_all(bytes).unwrap();
    path.to_path_buf()
}

/// Creates an empty project named `name` within `dir`, with given `kernel`
/// (both its areas created). Returns the project file path.
pub fn create_project(dir: &Path, name: &str, kernel: &str) -> PathBuf {
    let file = dir.join(format!("{}.pospac", name));
    File::create(&file).unwrap();
    for area in ["Extract", "Proc"] {
        create_dir_all(dir.join(name).join(kernel).join(area)).unwrap();
    }
    file
}
