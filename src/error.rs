use std::path::PathBuf;
use thiserror::Error;

/// Structural errors: the file can't be interpreted as a sequence
/// of fixed size records with the assumed field count.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("a record must contain at least one field")]
    NoFields,
    #[error("file size ({size} bytes) is not a multiple of the record length ({record_width} bytes)")]
    Misaligned { size: u64, record_width: u64 },
    #[error("file does not contain a single record")]
    Empty,
    #[error("start time ({start:.3}) is not before end time ({end:.3})")]
    NonIncreasingTime { start: f64, end: f64 },
}

/// Query errors: requested record, field or time lies outside the file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("record #{index} is out of range (1..={count})")]
    Record { index: usize, count: usize },
    #[error("field #{index} is out of range (1..={count})")]
    Field { index: usize, count: usize },
    #[error("time {time:.3} is not within file bounds ({start:.3}..={end:.3})")]
    Time { time: f64, start: f64, end: f64 },
    #[error("fractional record {position:.3} lies outside of the file (1..={count})")]
    FractionalRecord { position: f64, count: usize },
    #[error("records #{left} and #{right} do not bracket time {time:.3}")]
    NotBracketed { time: f64, left: usize, right: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record file: {0}")]
    Format(#[from] FormatError),
    #[error("out of range: {0}")]
    Range(#[from] RangeError),
    #[error("inverse geodesic did not converge within {0} iterations")]
    Convergence(usize),
    #[error("trajectories do not share a common epoch window ([{start}, {end}[)")]
    EmptyWindow { start: i64, end: i64 },
    #[error("field count of \"{}\" not found in {min}..={max}", .path.display())]
    DetectionFailure {
        path: PathBuf,
        min: usize,
        max: usize,
    },
    #[error("epoch step must be a positive number of seconds")]
    InvalidStep,
    #[error("at least one worker is required")]
    InvalidWorkers,
    #[error("record contains {found} fields, expecting {expected}")]
    RecordLength { expected: usize, found: usize },
    #[error("not a POSPac project: \"{}\"", .0.display())]
    NotAProject(PathBuf),
    #[error("unable to determine project kernel in \"{}\"", .0.display())]
    UndetectedKernel(PathBuf),
    #[error("data file does not exist: \"{}\"", .0.display())]
    MissingDataFile(PathBuf),
    #[error("unknown POSPac version \"{0}\"")]
    UnknownVersion(String),
}
