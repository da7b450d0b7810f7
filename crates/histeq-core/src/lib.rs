//! histeq Core - Basic data structures for grayscale equalization
//!
//! This crate provides the fundamental pieces shared by the rest of the
//! workspace:
//!
//! - [`PixelBuffer`] - 8-bit grayscale image container
//! - [`Partition`] - disjoint, covering split of an index range
//! - [`Histogram`] / [`HistogramBuilder`] - parallel intensity histogram
//! - [`WorkerPool`] - per-call pool that joins all workers before returning
//! - [`Error`] / [`ErrorKind`] - failure taxonomy

pub mod buffer;
pub mod error;
pub mod histogram;
pub mod partition;
pub mod pool;

pub use buffer::PixelBuffer;
pub use error::{Error, ErrorKind, Result};
pub use histogram::{Histogram, HistogramBuilder};
pub use partition::Partition;
pub use pool::{WorkerPool, available_workers};

/// Number of intensity levels (histogram buckets) for 8-bit samples.
pub const LEVELS: usize = 256;

/// Highest intensity level; the target maximum of equalization.
pub const MAX_LEVEL: u8 = 255;

const _: () = assert!(MAX_LEVEL as usize == LEVELS - 1);
