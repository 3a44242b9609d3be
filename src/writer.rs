//! Buffered fixed size record production
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{prelude::Error, record::FIELD_WIDTH};

/// [RecordWriter] streams fixed size records, in native byte order.
/// What it produces is readable by [crate::prelude::RecordFile]
/// with the same field count.
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    writer: BufWriter<W>,
    fields: usize,
    records: usize,
}

impl RecordWriter<File> {
    /// Creates (or truncates) the file located at `path`
    pub fn create<P: AsRef<Path>>(path: P, fields: usize) -> Result<Self, Error> {
        let fd = File::create(path)?;
        Ok(Self::new(fd, fields))
    }
}

impl<W: Write> RecordWriter<W> {
    /// Creates a new [RecordWriter] producing records of `fields` doubles
    pub fn new(w: W, fields: usize) -> Self {
        Self {
            writer: BufWriter::new(w),
            fields,
            records: 0,
        }
    }

    /// Number of fields per record
    pub fn fields(&self) -> usize {
        self.fields
    }

    /// Number of records produced so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Appends one record. Its length must match the field count.
    pub fn write_record(&mut self, record: &[f64]) -> Result<(), Error> {
        if record.len() != self.fields {
            return Err(Error::RecordLength {
                expected: self.fields,
                found: record.len(),
            });
        }
        let mut buf = Vec::with_capacity(self.fields * FIELD_WIDTH);
        for value in record {
            buf.extend_from_slice(&value.to_ne_bytes());
        }
        self.writer.write_all(&buf)?;
        self.records += 1;
        Ok(())
    }

    /// Flushes all pending records and returns the total record count.
    pub fn finish(mut self) -> Result<usize, Error> {
        self.writer.flush()?;
        Ok(self.records)
    }

    /// Flushes all pending records and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, Error> {
        let w = self.writer.into_inner().map_err(|e| e.into_error())?;
        Ok(w)
    }
}
