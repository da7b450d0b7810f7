//! histeq-filter - Histogram equalization
//!
//! This crate turns a [`histeq_core::Histogram`] into a contrast-normalizing
//! remap and applies it:
//!
//! - [`LevelMapper`] / [`LevelTable`] - cumulative-distribution level table
//! - [`Equalizer`] / [`equalize`] - histogram, table, and parallel apply
//! - [`EqualizeOptions`] - worker count configuration

pub mod equalize;
mod error;
pub mod level;
pub mod options;

pub use error::{FilterError, FilterResult};
pub use level::{LevelMapper, LevelTable};
pub use options::{EqualizeOptions, WORKERS_ENV};

// Re-export commonly used functions
pub use equalize::{
    EqualizeReport, Equalizer, PhaseTimings, apply_table, equalize, equalize_with_report,
};
