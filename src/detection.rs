//! Field count detection.
//!
//! Record files do not describe themselves: when the field count of a file
//! is unknown (or the declared one is wrong), candidate counts are tried in
//! ascending order and the first interpretation satisfying the structural
//! invariants of [RecordFile] wins. Both invariants are weak, so a wrong
//! (smaller) count may be accepted in rare cases: known field counts should
//! always be preferred.
use std::{ops::RangeInclusive, path::Path};

use log::{debug, info};

use crate::prelude::{Error, RecordFile};

/// Field counts tried by [detect_fields]
pub const DEFAULT_CANDIDATES: RangeInclusive<usize> = 5..=99;

/// Opens the [RecordFile] located at `path`, detecting its field count
/// within [DEFAULT_CANDIDATES].
pub fn detect_fields<P: AsRef<Path>>(path: P) -> Result<RecordFile, Error> {
    detect_fields_within(path, DEFAULT_CANDIDATES)
}

/// Opens the [RecordFile] located at `path`, detecting its field count
/// within `candidates`. Only structural failures are considered a
/// mismatch: I/O errors abort the detection.
pub fn detect_fields_within<P: AsRef<Path>>(
    path: P,
    candidates: RangeInclusive<usize>,
) -> Result<RecordFile, Error> {
    let path = path.as_ref();

    for fields in candidates.clone() {
        match RecordFile::open(path, fields) {
            Ok(file) => {
                info!("{}: detected {} fields", path.display(), fields);
                return Ok(file);
            },
            Err(Error::Format(e)) => {
                debug!("{}: not {} fields: {}", path.display(), fields, e);
            },
            Err(e) => return Err(e),
        }
    }

    Err(Error::DetectionFailure {
        path: path.to_path_buf(),
        min: *candidates.start(),
        max: *candidates.end(),
    })
}
