//! histeq-test - Regression test framework for histeq
//!
//! Supports three modes, selected by `REGTEST_MODE`:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run tests without comparison
//!
//! # Usage
//!
//! ```ignore
//! use histeq_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("equalize");
//! let src = fixtures::gradient(64, 64, true)?;
//! rp.compare_values(4096.0, src.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // histeq-test is at crates/histeq-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
