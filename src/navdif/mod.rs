//! NAVDIF: epoch by epoch comparison of two trajectories.
//!
//! A solution trajectory is compared to a reference trajectory on
//! a whole second time grid, over the window both files cover.
//! The resulting [Difference]s are stored as a 14 field record file,
//! which reopens as any other [RecordFile].
use std::{
    io::Write,
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use itertools::Itertools;
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::{
    prelude::{Error, RecordFile},
    writer::RecordWriter,
};

mod difference;
mod sample;

pub use difference::{field, Difference, NAVDIF_FIELDS};
pub use sample::{Layout, Sample};

/// Default epoch step, in seconds
pub const DEFAULT_STEP: u32 = 5;

/// Minimal number of epochs of a run
pub const MIN_EPOCHS: usize = 2;

/// Progress callback: receives the completion percentage after each epoch
pub type Progress<'a> = &'a (dyn Fn(f64) + Sync);

/// NAVDIF run summary
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Summary {
    /// First epoch (included)
    pub start: i64,
    /// Window end (excluded)
    pub end: i64,
    /// Epoch step, in seconds
    pub step: u32,
    /// Number of records produced
    pub records: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} epochs in [{}, {}[ every {}s",
            self.records, self.start, self.end, self.step
        )
    }
}

/// [Navdif] differencing engine
#[derive(Debug, Clone, PartialEq)]
pub struct Navdif {
    step: u32,
    interpolate: bool,
    workers: usize,
    layout: Layout,
}

impl Default for Navdif {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            interpolate: false,
            workers: 1,
            layout: Layout::default(),
        }
    }
}

impl Navdif {
    /// Copies and returns [Navdif] with desired epoch step (in seconds)
    pub fn with_step(&self, step: u32) -> Self {
        let mut s = self.clone();
        s.step = step;
        s
    }

    /// Copies and returns [Navdif] sampling both trajectories by
    /// interpolation rather than nearest record.
    pub fn with_interpolation(&self, interpolate: bool) -> Self {
        let mut s = self.clone();
        s.interpolate = interpolate;
        s
    }

    /// Copies and returns [Navdif] spreading epochs over `workers` threads.
    pub fn with_workers(&self, workers: usize) -> Self {
        let mut s = self.clone();
        s.workers = workers;
        s
    }

    /// Copies and returns [Navdif] with custom trajectory [Layout]
    pub fn with_layout(&self, layout: Layout) -> Self {
        let mut s = self.clone();
        s.layout = layout;
        s
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn interpolates(&self) -> bool {
        self.interpolate
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Common epoch window [start, end[ of both trajectories
    pub fn window(&self, solution: &RecordFile, reference: &RecordFile) -> Result<(i64, i64), Error> {
        let start = solution.common_start(reference);
        let end = solution.common_end(reference);
        if start >= end {
            return Err(Error::EmptyWindow { start, end });
        }
        Ok((start, end))
    }

    /// Epochs to be differenced
    pub fn epochs(&self, solution: &RecordFile, reference: &RecordFile) -> Result<Vec<i64>, Error> {
        let (start, end) = self.window(solution, reference)?;
        self.grid(start, end)
    }

    /// Epochs of [start, end[ every step. A single epoch would not
    /// produce a valid record file, its start and end times being equal.
    fn grid(&self, start: i64, end: i64) -> Result<Vec<i64>, Error> {
        if self.step == 0 {
            return Err(Error::InvalidStep);
        }
        let epochs = (start..end).step_by(self.step as usize).collect_vec();
        if epochs.len() < MIN_EPOCHS {
            return Err(Error::EmptyWindow { start, end });
        }
        Ok(epochs)
    }

    /// [Difference] at epoch `t`
    pub fn difference(
        &self,
        solution: &RecordFile,
        reference: &RecordFile,
        t: f64,
    ) -> Result<Difference, Error> {
        let (sol, refr) = if self.interpolate {
            (
                Sample::interpolated(solution, &self.layout, t)?,
                Sample::interpolated(reference, &self.layout, t)?,
            )
        } else {
            (
                Sample::nearest(solution, &self.layout, t)?,
                Sample::nearest(reference, &self.layout, t)?,
            )
        };
        Difference::between(t, &sol, &refr)
    }

    /// Differences `solution` and `reference` and stores the result at `output`,
    /// in ascending epoch order. `progress` is notified after each epoch.
    /// Records are produced in a temporary file, next to `output`, which
    /// only replaces `output` once the run succeeded.
    pub fn run<P: AsRef<Path>>(
        &self,
        solution: &RecordFile,
        reference: &RecordFile,
        output: P,
        progress: Option<Progress>,
    ) -> Result<Summary, Error> {
        if self.workers == 0 {
            return Err(Error::InvalidWorkers);
        }

        let (start, end) = self.window(solution, reference)?;
        let epochs = self.grid(start, end)?;

        info!(
            "navdif \"{}\" - \"{}\": [{}, {}[ every {}s",
            solution.path().display(),
            reference.path().display(),
            start,
            end,
            self.step
        );

        let output = output.as_ref();
        let directory = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut writer = RecordWriter::new(NamedTempFile::new_in(directory)?, NAVDIF_FIELDS);

        if self.workers > 1 {
            self.run_parallel(solution, reference, &epochs, &mut writer, progress)?;
        } else {
            self.run_sequential(solution, reference, &epochs, &mut writer, progress)?;
        }

        let records = writer.records();

        writer
            .into_inner()?
            .persist(output)
            .map_err(|e| Error::Io(e.error))?;

        debug!("{}: {} records", output.display(), records);

        Ok(Summary {
            start,
            end,
            step: self.step,
            records,
        })
    }

    fn run_sequential<W: Write>(
        &self,
        solution: &RecordFile,
        reference: &RecordFile,
        epochs: &[i64],
        writer: &mut RecordWriter<W>,
        progress: Option<Progress>,
    ) -> Result<(), Error> {
        let total = epochs.len();

        for (index, t) in epochs.iter().enumerate() {
            let difference = self.difference(solution, reference, *t as f64)?;
            writer.write_record(&difference.to_record())?;
            if let Some(progress) = progress {
                progress(percentage(index + 1, total));
            }
        }

        Ok(())
    }

    /// Epochs are split in contiguous chunks, one per worker. Each worker
    /// reads through its own file handles and chunks are written back in order.
    fn run_parallel<W: Write>(
        &self,
        solution: &RecordFile,
        reference: &RecordFile,
        epochs: &[i64],
        writer: &mut RecordWriter<W>,
        progress: Option<Progress>,
    ) -> Result<(), Error> {
        let total = epochs.len();
        let chunk_size = (total + self.workers - 1) / self.workers;
        let completed = AtomicUsize::new(0);

        let chunks = thread::scope(|scope| {
            let handles = epochs
                .chunks(chunk_size.max(1))
                .map(|chunk| {
                    let completed = &completed;
                    scope.spawn(move || -> Result<Vec<Difference>, Error> {
                        let solution = solution.reopen()?;
                        let reference = reference.reopen()?;
                        chunk
                            .iter()
                            .map(|t| {
                                let difference =
                                    self.difference(&solution, &reference, *t as f64)?;
                                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                                if let Some(progress) = progress {
                                    progress(percentage(done, total));
                                }
                                Ok(difference)
                            })
                            .collect()
                    })
                })
                .collect_vec();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect_vec()
        });

        for chunk in chunks {
            for difference in chunk? {
                writer.write_record(&difference.to_record())?;
            }
        }

        Ok(())
    }
}

fn percentage(done: usize, total: usize) -> f64 {
    done as f64 / total as f64 * 100.0
}

/// Differences `solution` and `reference` every `step` seconds with
/// nearest record sampling, stores the result at `output`.
/// See [Navdif] for more options.
pub fn compute_differences<P: AsRef<Path>>(
    solution: &RecordFile,
    reference: &RecordFile,
    output: P,
    step: u32,
    progress: Option<Progress>,
) -> Result<Summary, Error> {
    Navdif::default()
        .with_step(step)
        .run(solution, reference, output, progress)
}
