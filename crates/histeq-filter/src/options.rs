//! Equalization options
//!
//! The worker count comes from, in increasing priority: the machine's
//! available parallelism, the `HISTEQ_WORKERS` environment variable, and
//! an explicit [`EqualizeOptions::with_workers`].

use crate::{FilterError, FilterResult};

/// Environment variable holding the default worker count.
pub const WORKERS_ENV: &str = "HISTEQ_WORKERS";

/// Options controlling an equalization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualizeOptions {
    /// Number of parallel workers per phase (>= 1)
    pub workers: usize,
}

impl Default for EqualizeOptions {
    fn default() -> Self {
        Self {
            workers: histeq_core::available_workers(),
        }
    }
}

impl EqualizeOptions {
    /// Options with an explicit worker count.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `workers` is 0.
    pub fn with_workers(workers: usize) -> FilterResult<Self> {
        if workers == 0 {
            return Err(FilterError::InvalidParameters(
                "workers must be >= 1".into(),
            ));
        }
        Ok(Self { workers })
    }

    /// Read the worker count from `HISTEQ_WORKERS`.
    ///
    /// An unset variable gives the default; an unparsable or zero value is
    /// logged and also gives the default.
    pub fn from_env() -> Self {
        match std::env::var(WORKERS_ENV) {
            Ok(raw) => Self::parse_workers(&raw).unwrap_or_else(|e| {
                log::warn!("ignoring {}={:?}: {}", WORKERS_ENV, raw, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse a worker count such as `"4"`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `raw` is not a positive
    /// integer.
    pub fn parse_workers(raw: &str) -> FilterResult<Self> {
        let workers = raw.trim().parse::<usize>().map_err(|e| {
            FilterError::InvalidParameters(format!("worker count {:?}: {}", raw, e))
        })?;
        Self::with_workers(workers)
    }
}
