//! Intensity histogram and its parallel builder
//!
//! [`HistogramBuilder::build`] is a two-step parallel reduction:
//!
//! 1. The pixel index range is split into one contiguous [`Partition`]
//!    range per worker. Each worker scans only its range into a private
//!    256-slot counter array, touching no shared state.
//! 2. After every worker has joined, the calling thread sums the private
//!    arrays bucket by bucket into the global [`Histogram`].
//!
//! The merged counts equal the pixel count for any worker count, and
//! since bucket addition commutes, the result does not depend on
//! scheduling order.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::partition::Partition;
use crate::pool::WorkerPool;
use crate::LEVELS;
use std::time::Instant;

/// Occurrence count per intensity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Create a histogram with every bucket at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; LEVELS],
        }
    }

    /// Create a histogram from explicit bucket counts.
    pub fn from_counts(counts: [u64; LEVELS]) -> Self {
        Self { counts }
    }

    /// Count every sample of `pixels` sequentially.
    pub fn from_pixels(pixels: &[u8]) -> Self {
        let mut hist = Self::new();
        hist.accumulate(pixels);
        hist
    }

    /// Get the count for `level`.
    #[inline]
    pub fn get(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Get all bucket counts, indexed by level.
    #[inline]
    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterate over `(level, count)` pairs in ascending level order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(level, &count)| (level as u8, count))
    }

    /// Levels with a non-zero count, ascending.
    pub fn occupied_levels(&self) -> Vec<u8> {
        self.iter()
            .filter(|&(_, count)| count > 0)
            .map(|(level, _)| level)
            .collect()
    }

    /// Add every bucket of `other` into this histogram.
    pub fn merge(&mut self, other: &Histogram) {
        for (dst, src) in self.counts.iter_mut().zip(other.counts.iter()) {
            *dst += *src;
        }
    }

    fn accumulate(&mut self, pixels: &[u8]) {
        for &p in pixels {
            self.counts[p as usize] += 1;
        }
    }
}

/// Builds a [`Histogram`] with one private accumulator per worker.
#[derive(Debug, Clone, Copy)]
pub struct HistogramBuilder {
    workers: usize,
}

impl HistogramBuilder {
    /// Create a builder that splits the scan across `workers` workers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerCount`] if `workers` is 0.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidWorkerCount(workers));
        }
        Ok(Self { workers })
    }

    /// Get the configured worker count.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Compute the histogram of `buffer`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] / [`Error::EmptyImage`] for a buffer
    ///   without pixels
    /// - [`Error::WorkerFailed`] if any worker faults; the partial counts
    ///   of the other workers are discarded
    /// - [`Error::PixelCountMismatch`] if the merged total disagrees with
    ///   the pixel count
    pub fn build(&self, buffer: &PixelBuffer) -> Result<Histogram> {
        buffer.validate()?;
        let partition = Partition::new(buffer.len(), self.workers)?;
        self.build_partitioned(buffer.pixels(), &partition)
    }

    /// Compute the histogram of `pixels` over an existing partition.
    ///
    /// # Errors
    ///
    /// See [`HistogramBuilder::build`]. A range that falls outside
    /// `pixels` fails its worker with [`Error::WorkerFailed`].
    pub fn build_partitioned(&self, pixels: &[u8], partition: &Partition) -> Result<Histogram> {
        let start = Instant::now();
        let pool = WorkerPool::new(partition.workers())?;

        let locals = pool.run(partition.ranges().to_vec(), |worker, range| {
            let chunk = pixels.get(range.clone()).ok_or_else(|| Error::WorkerFailed {
                worker,
                reason: format!(
                    "range {}..{} outside buffer of {} pixels",
                    range.start,
                    range.end,
                    pixels.len()
                ),
            })?;
            log::trace!("histogram worker {}: {} pixels", worker, chunk.len());
            Ok(Histogram::from_pixels(chunk))
        })?;

        // All workers have joined; only this thread writes the global counts.
        let mut hist = Histogram::new();
        for local in &locals {
            hist.merge(local);
        }

        let expected = pixels.len() as u64;
        let actual = hist.total();
        if actual != expected {
            return Err(Error::PixelCountMismatch { expected, actual });
        }

        log::debug!(
            "histogram: {} pixels, {} workers ({} active), {:?}",
            expected,
            partition.workers(),
            partition.active_workers(),
            start.elapsed()
        );
        Ok(hist)
    }
}

impl PixelBuffer {
    /// Compute the intensity histogram using `workers` parallel workers.
    ///
    /// # Example
    ///
    /// ```
    /// use histeq_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::filled(8, 8, 42).unwrap();
    /// let hist = buf.histogram(4).unwrap();
    /// assert_eq!(hist.get(42), 64);
    /// ```
    pub fn histogram(&self, workers: usize) -> Result<Histogram> {
        HistogramBuilder::new(workers)?.build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 % 256) as u8).collect()
    }

    #[test]
    fn test_from_pixels_counts() {
        let hist = Histogram::from_pixels(&[0, 0, 5, 255]);
        assert_eq!(hist.get(0), 2);
        assert_eq!(hist.get(5), 1);
        assert_eq!(hist.get(255), 1);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.occupied_levels(), vec![0, 5, 255]);
    }

    #[test]
    fn test_merge_elementwise() {
        let mut a = Histogram::from_pixels(&[1, 2, 2]);
        let b = Histogram::from_pixels(&[2, 3]);
        a.merge(&b);
        assert_eq!(a.get(1), 1);
        assert_eq!(a.get(2), 3);
        assert_eq!(a.get(3), 1);
        assert_eq!(a.total(), 5);
    }

    #[test]
    fn test_build_matches_sequential() {
        let pixels = ramp(1000);
        let buf = PixelBuffer::from_vec(40, 25, pixels.clone()).unwrap();
        let expected = Histogram::from_pixels(&pixels);
        for workers in [1, 2, 3, 8, 1000, 1007] {
            let hist = HistogramBuilder::new(workers).unwrap().build(&buf).unwrap();
            assert_eq!(hist, expected, "workers = {}", workers);
        }
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            HistogramBuilder::new(0),
            Err(Error::InvalidWorkerCount(0))
        ));
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let buf = PixelBuffer::from_raw_parts(0, 3, Vec::new()).unwrap();
        let err = HistogramBuilder::new(2).unwrap().build(&buf).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_out_of_bounds_partition_fails_worker() {
        let pixels = ramp(8);
        let partition = Partition::new(16, 2).unwrap();
        let err = HistogramBuilder::new(2)
            .unwrap()
            .build_partitioned(&pixels, &partition)
            .unwrap_err();
        assert!(matches!(err, Error::WorkerFailed { worker: 1, .. }));
    }
}
