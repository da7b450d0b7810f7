//! Global histogram equalization
//!
//! The pipeline runs three strictly sequential phases:
//!
//! 1. **Histogram** - parallel reduction over a [`Partition`] of the pixel
//!    range ([`HistogramBuilder`])
//! 2. **Mapping** - sequential cumulative sum into a [`LevelTable`]
//!    ([`LevelMapper`])
//! 3. **Apply** - parallel `dest[i] = table[src[i]]` over the same
//!    partition; each worker writes only its own slice of `dest`
//!
//! Each phase finishes, and its result is fully built, before the next
//! one starts. The source buffer is never modified.

use crate::level::{LevelMapper, LevelTable};
use crate::options::EqualizeOptions;
use crate::FilterResult;
use histeq_core::{Error, Histogram, HistogramBuilder, Partition, PixelBuffer, WorkerPool};
use std::time::{Duration, Instant};

/// Wall-clock time spent in each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Parallel histogram build and merge
    pub histogram: Duration,
    /// Sequential level table computation
    pub mapping: Duration,
    /// Parallel table application
    pub apply: Duration,
}

impl PhaseTimings {
    /// Sum of all phases.
    pub fn total(&self) -> Duration {
        self.histogram + self.mapping + self.apply
    }
}

/// Intermediate results of one equalization run.
#[derive(Debug, Clone)]
pub struct EqualizeReport {
    /// Histogram of the source image
    pub histogram: Histogram,
    /// Table that was applied
    pub table: LevelTable,
    /// Worker count used for both parallel phases
    pub workers: usize,
    /// Wall-clock time of each phase
    pub timings: PhaseTimings,
}

/// Histogram equalizer.
///
/// # Examples
///
/// ```
/// use histeq_core::PixelBuffer;
/// use histeq_filter::Equalizer;
///
/// let src = PixelBuffer::from_vec(2, 2, vec![0, 85, 170, 255]).unwrap();
/// let dest = Equalizer::with_workers(2).unwrap().equalize(&src).unwrap();
/// assert_eq!(dest.pixels(), &[63, 127, 191, 255]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Equalizer {
    options: EqualizeOptions,
}

impl Equalizer {
    /// Equalizer with the given options.
    pub fn new(options: EqualizeOptions) -> Self {
        Self { options }
    }

    /// Equalizer using `workers` parallel workers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FilterError::InvalidParameters`] if `workers` is 0.
    pub fn with_workers(workers: usize) -> FilterResult<Self> {
        Ok(Self::new(EqualizeOptions::with_workers(workers)?))
    }

    /// Get the options of this equalizer.
    pub fn options(&self) -> &EqualizeOptions {
        &self.options
    }

    /// Equalize `src` into a newly allocated buffer.
    pub fn equalize(&self, src: &PixelBuffer) -> FilterResult<PixelBuffer> {
        equalize(src, self.options.workers)
    }

    /// Equalize `src` and also return the intermediate results.
    pub fn equalize_with_report(
        &self,
        src: &PixelBuffer,
    ) -> FilterResult<(PixelBuffer, EqualizeReport)> {
        equalize_with_report(src, self.options.workers)
    }
}

/// Equalize the histogram of `src` using `workers` parallel workers.
///
/// The result has the same dimensions as `src` and does not depend on
/// `workers`.
///
/// # Errors
///
/// - InvalidInput: zero width/height, empty image, `workers == 0`
/// - AllocationFailure: destination buffer could not be allocated
/// - WorkerFailure: a worker faulted in either parallel phase
///
/// No partial buffer is returned on failure.
pub fn equalize(src: &PixelBuffer, workers: usize) -> FilterResult<PixelBuffer> {
    equalize_with_report(src, workers).map(|(dest, _)| dest)
}

/// Like [`equalize`], also returning histogram, table, and phase timings.
pub fn equalize_with_report(
    src: &PixelBuffer,
    workers: usize,
) -> FilterResult<(PixelBuffer, EqualizeReport)> {
    src.validate()?;
    let builder = HistogramBuilder::new(workers)?;
    let partition = Partition::new(src.len(), workers)?;

    let start = Instant::now();
    let histogram = builder.build_partitioned(src.pixels(), &partition)?;
    let hist_time = start.elapsed();

    let start = Instant::now();
    let table = LevelMapper::map(&histogram, src.len() as u64)?;
    let map_time = start.elapsed();
    log::debug!("level table: {:?}", map_time);

    let start = Instant::now();
    let dest = apply_partitioned(src, &table, &partition)?;
    let apply_time = start.elapsed();

    let report = EqualizeReport {
        histogram,
        table,
        workers,
        timings: PhaseTimings {
            histogram: hist_time,
            mapping: map_time,
            apply: apply_time,
        },
    };
    Ok((dest, report))
}

/// Remap every pixel of `src` through `table` using `workers` workers.
///
/// # Errors
///
/// Same classes as [`equalize`].
pub fn apply_table(
    src: &PixelBuffer,
    table: &LevelTable,
    workers: usize,
) -> FilterResult<PixelBuffer> {
    src.validate()?;
    let partition = Partition::new(src.len(), workers)?;
    apply_partitioned(src, table, &partition)
}

fn apply_partitioned(
    src: &PixelBuffer,
    table: &LevelTable,
    partition: &Partition,
) -> FilterResult<PixelBuffer> {
    let start = Instant::now();
    let len = src.len();
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed { bytes: len })?;
    out.resize(len, 0u8);

    let pool = WorkerPool::new(partition.workers())?;
    {
        let jobs: Vec<(&[u8], &mut [u8])> = partition
            .split(src.pixels())?
            .into_iter()
            .zip(partition.split_mut(&mut out)?)
            .collect();

        pool.run(jobs, |worker, (input, output)| {
            log::trace!("apply worker {}: {} pixels", worker, input.len());
            for (d, &s) in output.iter_mut().zip(input) {
                *d = table[s];
            }
            Ok(())
        })?;
    }

    log::debug!(
        "apply: {} pixels, {} workers, {:?}",
        len,
        partition.workers(),
        start.elapsed()
    );
    Ok(PixelBuffer::from_vec(src.width(), src.height(), out)?)
}
