//! Fixed size record files: indexed and time addressable access.
//!
//! A record file is a plain sequence of records, each record being
//! `fields` consecutive IEEE-754 doubles in native byte order,
//! without header nor padding. The first field of every record is
//! a non decreasing timestamp, in seconds.
//!
//! Records and fields are numbered from 1, which is the convention
//! every downstream analysis (and its field tables) was written against.
//! Offsets are computed 0-based internally.
use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use log::debug;
use nalgebra::DMatrix;

use crate::prelude::{Error, FormatError, RangeError};

/// Width of a single field, in bytes
pub const FIELD_WIDTH: usize = 8;

/// Index of the first record, or first field
pub const FIRST_INDEX: usize = 1;

/// Field holding the timestamp of each record
pub const TIME_FIELD: usize = 1;

/// [RecordFile] gives random access to a fixed size record file.
/// It is read-only and never mutated once opened.
/// The file handle is released when [RecordFile] is dropped.
#[derive(Debug)]
pub struct RecordFile {
    path: PathBuf,
    fd: Mutex<File>,
    fields: usize,
    size: u64,
    records: usize,
    start_time: f64,
    end_time: f64,
    time_inc: f64,
}

impl RecordFile {
    /// Opens the [RecordFile] located at `path`, interpreted as records
    /// of `fields` doubles. Fails with [FormatError] when the file size
    /// is not a multiple of the record width, or when the last timestamp
    /// does not follow the first one.
    /// Start time, end time and time increment are determined right away.
    pub fn open<P: AsRef<Path>>(path: P, fields: usize) -> Result<Self, Error> {
        if fields == 0 {
            return Err(FormatError::NoFields.into());
        }

        let path = path.as_ref();
        let fd = File::open(path)?;
        let size = fd.metadata()?.len();

        let record_width = (fields * FIELD_WIDTH) as u64;

        if size % record_width != 0 {
            return Err(FormatError::Misaligned { size, record_width }.into());
        }

        let records = (size / record_width) as usize;

        if records == 0 {
            return Err(FormatError::Empty.into());
        }

        let mut s = Self {
            path: path.to_path_buf(),
            fd: Mutex::new(fd),
            fields,
            size,
            records,
            start_time: 0.0,
            end_time: 0.0,
            time_inc: 0.0,
        };

        let first = s.field(FIRST_INDEX, TIME_FIELD)?;
        let last = s.field(records, TIME_FIELD)?;

        s.start_time = round_millisecond(first);
        s.end_time = round_millisecond(last);

        // also rejects NaN timestamps
        if !(s.end_time > s.start_time) {
            return Err(FormatError::NonIncreasingTime {
                start: s.start_time,
                end: s.end_time,
            }
            .into());
        }

        // Averaged over the whole file: two consecutive timestamps
        // float too much to define the sampling period.
        s.time_inc = (last - first) / (records - 1) as f64;

        debug!(
            "{}: {} records of {} fields, {:.3}s..{:.3}s (inc={:.6}s)",
            s.path.display(),
            s.records,
            s.fields,
            s.start_time,
            s.end_time,
            s.time_inc
        );

        Ok(s)
    }

    /// Opens a new [RecordFile] on the same file,
    /// with its own file handle.
    pub fn reopen(&self) -> Result<Self, Error> {
        Ok(Self {
            path: self.path.clone(),
            fd: Mutex::new(File::open(&self.path)?),
            ..*self
        })
    }

    /// File location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of fields per record
    pub fn fields(&self) -> usize {
        self.fields
    }

    /// Record width, in bytes
    pub fn record_width(&self) -> usize {
        self.fields * FIELD_WIDTH
    }

    /// File size, in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of records
    pub fn records(&self) -> usize {
        self.records
    }

    /// First timestamp, rounded to the millisecond
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Last timestamp, rounded to the millisecond
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Average time increment between two records, in seconds
    pub fn time_inc(&self) -> f64 {
        self.time_inc
    }

    /// Total time span, in seconds
    pub fn time_span(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Byte offset of given (1-based) record and field
    fn offset(&self, record: usize, field: usize) -> Result<u64, RangeError> {
        if record < FIRST_INDEX || record > self.records {
            return Err(RangeError::Record {
                index: record,
                count: self.records,
            });
        }
        if field < FIRST_INDEX || field > self.fields {
            return Err(RangeError::Field {
                index: field,
                count: self.fields,
            });
        }
        let (record, field) = (record - FIRST_INDEX, field - FIRST_INDEX);
        Ok((record * self.record_width() + field * FIELD_WIDTH) as u64)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), Error> {
        let mut fd = self.fd.lock().unwrap_or_else(PoisonError::into_inner);
        fd.seek(SeekFrom::Start(offset))?;
        fd.read_exact(buf)?;
        Ok(())
    }

    /// Reads a single value, from given record and field (both 1-based).
    /// Every call is an independent read access.
    pub fn field(&self, record: usize, field: usize) -> Result<f64, Error> {
        let offset = self.offset(record, field)?;
        let mut buf = [0_u8; FIELD_WIDTH];
        self.read_at(offset, &mut buf)?;
        Ok(f64::from_ne_bytes(buf))
    }

    /// Reads an entire record (1-based) at once
    pub fn record(&self, record: usize) -> Result<Vec<f64>, Error> {
        let offset = self.offset(record, FIRST_INDEX)?;
        let mut buf = vec![0_u8; self.record_width()];
        self.read_at(offset, &mut buf)?;
        Ok(buf
            .chunks_exact(FIELD_WIDTH)
            .map(|bytes| {
                let mut field = [0_u8; FIELD_WIDTH];
                field.copy_from_slice(bytes);
                f64::from_ne_bytes(field)
            })
            .collect())
    }

    /// Reads a block of data: one row per record, one column per field.
    /// Each (record, field) pair is read independently.
    pub fn block(&self, records: &[usize], fields: &[usize]) -> Result<DMatrix<f64>, Error> {
        let mut block = DMatrix::<f64>::zeros(records.len(), fields.len());
        for (row, record) in records.iter().enumerate() {
            for (col, field) in fields.iter().enumerate() {
                block[(row, col)] = self.field(*record, *field)?;
            }
        }
        Ok(block)
    }

    fn check_time(&self, t: f64) -> Result<(), RangeError> {
        if t >= self.start_time && t <= self.end_time {
            Ok(())
        } else {
            Err(RangeError::Time {
                time: t,
                start: self.start_time,
                end: self.end_time,
            })
        }
    }

    /// Record predicted from the closest file boundary and nominal increment.
    /// Predicting from the end when closer avoids predicting past it.
    fn predicted_record(&self, t: f64) -> usize {
        let predicted = if t <= self.start_time + self.time_span() / 2.0 {
            ((t - self.start_time) / self.time_inc).round() as i64 + FIRST_INDEX as i64
        } else {
            self.records as i64 - ((self.end_time - t) / self.time_inc).round() as i64
        };
        predicted.clamp(FIRST_INDEX as i64, self.records as i64) as usize
    }

    /// Fractional record number matching `t`.
    ///
    /// The sampling clock drifts (-0.05 to 0.12 s/hour are common), so a
    /// linear prediction can be off by several records on long recordings.
    /// The prediction is corrected with the time actually stored in the
    /// predicted record, which brings the error back to a fraction of
    /// the sampling period.
    pub fn precise_record(&self, t: f64) -> Result<f64, Error> {
        self.check_time(t)?;
        let predicted = self.predicted_record(t);
        let observed = self.field(predicted, TIME_FIELD)?;
        Ok(predicted as f64 + (t - observed) / self.time_inc)
    }

    /// Record whose timestamp is the closest to `t`.
    pub fn nearest_record(&self, t: f64) -> Result<usize, Error> {
        let precise = self.precise_record(t)?;
        let nearest = precise.round() as i64;
        Ok(nearest.clamp(FIRST_INDEX as i64, self.records as i64) as usize)
    }

    /// Linear interpolation of `field` at time `t`,
    /// between the two records bracketing `t`.
    /// Exact when `t` matches a record timestamp.
    pub fn interpolate(&self, t: f64, field: usize) -> Result<f64, Error> {
        let (first, last) = (FIRST_INDEX as f64, self.records as f64);
        let mut precise = self.precise_record(t)?;

        // file bounds are rounded to the millisecond: the first (last)
        // timestamp may lie slightly after (before) them.
        if precise < first && precise >= first - 0.5 {
            precise = first;
        } else if precise > last && precise <= last + 0.5 {
            precise = last;
        }

        let (left, right) = (precise.floor(), precise.ceil());

        if left < first || right > last {
            return Err(RangeError::FractionalRecord {
                position: precise,
                count: self.records,
            }
            .into());
        }

        let (mut left, mut right) = (left as usize, right as usize);

        if left == right {
            return self.field(left, field);
        }

        let (mut t_left, mut t_right) = (
            self.field(left, TIME_FIELD)?,
            self.field(right, TIME_FIELD)?,
        );

        // residual drift may land us one record off
        if t < t_left && left > FIRST_INDEX {
            (left, right) = (left - 1, left);
            (t_left, t_right) = (self.field(left, TIME_FIELD)?, t_left);
        } else if t > t_right && right < self.records {
            (left, right) = (right, right + 1);
            (t_left, t_right) = (t_right, self.field(right, TIME_FIELD)?);
        }

        if !(t_left <= t && t <= t_right) {
            return Err(RangeError::NotBracketed { time: t, left, right }.into());
        }

        if t == t_right {
            return self.field(right, field);
        }

        let y_left = self.field(left, field)?;

        if t == t_left || t_right == t_left {
            return Ok(y_left);
        }

        let y_right = self.field(right, field)?;
        let slope = (y_right - y_left) / (t_right - t_left);

        Ok(y_right - slope * (t_right - t))
    }

    /// Samples `fields` at each time of `times`: one row per time,
    /// one column per field. Samples either come from the nearest
    /// record, or are interpolated.
    pub fn data_by_time(
        &self,
        times: &[f64],
        fields: &[usize],
        interpolate: bool,
    ) -> Result<DMatrix<f64>, Error> {
        let mut data = DMatrix::<f64>::zeros(times.len(), fields.len());
        for (row, t) in times.iter().enumerate() {
            if interpolate {
                for (col, field) in fields.iter().enumerate() {
                    data[(row, col)] = self.interpolate(*t, *field)?;
                }
            } else {
                let record = self.nearest_record(*t)?;
                for (col, field) in fields.iter().enumerate() {
                    data[(row, col)] = self.field(record, *field)?;
                }
            }
        }
        Ok(data)
    }

    /// Earliest whole second covered by both files.
    pub fn common_start(&self, rhs: &Self) -> i64 {
        let lhs = round_millisecond(self.start_time).ceil();
        let rhs = round_millisecond(rhs.start_time).ceil();
        lhs.max(rhs) as i64
    }

    /// Latest whole second covered by both files.
    pub fn common_end(&self, rhs: &Self) -> i64 {
        let lhs = round_millisecond(self.end_time).floor();
        let rhs = round_millisecond(rhs.end_time).floor();
        lhs.min(rhs) as i64
    }
}

impl std::fmt::Display for RecordFile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "File: {}", self.path.display())?;
        writeln!(f, "Size: {} bytes", self.size)?;
        writeln!(f, "Fields: {}", self.fields)?;
        writeln!(f, "Records: {}", self.records)?;
        writeln!(f, "Start time: {:.3} s", self.start_time)?;
        writeln!(f, "End time: {:.3} s", self.end_time)?;
        writeln!(f, "Time span: {:.3} s", self.time_span())?;
        write!(f, "Time increment: {:.6} s", self.time_inc)
    }
}

pub(crate) fn round_millisecond(t: f64) -> f64 {
    (t * 1000.0).round() / 1000.0
}
