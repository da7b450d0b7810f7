//! Error types for histeq-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Every variant belongs to exactly one [`ErrorKind`], so callers can
//! branch on the failure class without matching individual variants.

use thiserror::Error;

/// Failure class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input was rejected before any parallel work started
    InvalidInput,
    /// A buffer could not be allocated
    AllocationFailure,
    /// A worker faulted; the whole phase was abandoned
    WorkerFailure,
}

/// histeq-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Width or height is zero
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel data length does not match width x height
    #[error("buffer size mismatch: expected {expected} pixels, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Worker count is zero
    #[error("invalid worker count: {0} (must be >= 1)")]
    InvalidWorkerCount(usize),

    /// The image has no pixels to count
    #[error("empty image: total pixel count is 0")]
    EmptyImage,

    /// Histogram total disagrees with the pixel count it claims to describe
    #[error("pixel count mismatch: expected {expected}, histogram holds {actual}")]
    PixelCountMismatch { expected: u64, actual: u64 },

    /// Memory allocation failed
    #[error("memory allocation failed ({bytes} bytes)")]
    AllocationFailed { bytes: usize },

    /// A worker could not complete its partition
    #[error("worker {worker} failed: {reason}")]
    WorkerFailed { worker: usize, reason: String },

    /// The worker pool could not be started
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

impl Error {
    /// Get the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDimension { .. }
            | Error::BufferSizeMismatch { .. }
            | Error::InvalidWorkerCount(_)
            | Error::EmptyImage
            | Error::PixelCountMismatch { .. } => ErrorKind::InvalidInput,
            Error::AllocationFailed { .. } => ErrorKind::AllocationFailure,
            Error::WorkerFailed { .. } | Error::ThreadPool(_) => ErrorKind::WorkerFailure,
        }
    }
}

/// Result type alias for histeq-core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_invalid_input() {
        assert_eq!(
            Error::InvalidDimension {
                width: 0,
                height: 4
            }
            .kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(Error::EmptyImage.kind(), ErrorKind::InvalidInput);
        assert_eq!(Error::InvalidWorkerCount(0).kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_kind_fatal() {
        assert_eq!(
            Error::AllocationFailed { bytes: 16 }.kind(),
            ErrorKind::AllocationFailure
        );
        let err = Error::WorkerFailed {
            worker: 3,
            reason: "panicked".into(),
        };
        assert_eq!(err.kind(), ErrorKind::WorkerFailure);
        assert_eq!(err.to_string(), "worker 3 failed: panicked");
    }
}
