//! Error types for histeq-filter
//!
//! Every failure of the equalization pipeline surfaces as a single
//! [`FilterError`]; [`FilterError::kind`] tells the caller which class of
//! failure occurred.

use histeq_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during equalization
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histeq_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl FilterError {
    /// Get the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::Core(e) => e.kind(),
            FilterError::InvalidParameters(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
