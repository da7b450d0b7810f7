//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use histeq_core::PixelBuffer;
use histeq_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse a mode name; anything unrecognized is `Compare`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode, and every
/// failure seen. Each `compare_*` / `write_*` call advances the index, so
/// output and golden files are named `<test>.<index>.<ext>` and
/// `<test>_golden.<index>.<ext>`.
pub struct RegParams {
    /// Name of the test (e.g., "equalize")
    pub test_name: String,
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two buffers for identical dimensions and pixels
    pub fn compare_buffers(&mut self, expected: &PixelBuffer, actual: &PixelBuffer) -> bool {
        self.index += 1;

        if expected.width() != actual.width() || expected.height() != actual.height() {
            self.fail(format!(
                "Failure in {}_reg: buffer comparison for index {} - dimension mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            ));
            return false;
        }

        if let Some(i) = first_difference(expected.pixels(), actual.pixels()) {
            let width = expected.width().max(1) as usize;
            self.fail(format!(
                "Failure in {}_reg: buffer comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name,
                self.index,
                i % width,
                i / width
            ));
            return false;
        }

        true
    }

    /// Compare two level tables entry by entry
    pub fn compare_tables(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.compare_sequences("table", expected, actual)
    }

    /// Compare two histograms bucket by bucket
    pub fn compare_histograms(&mut self, expected: &[u64], actual: &[u64]) -> bool {
        self.compare_sequences("histogram", expected, actual)
    }

    fn compare_sequences<T: PartialEq + std::fmt::Debug>(
        &mut self,
        what: &str,
        expected: &[T],
        actual: &[T],
    ) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            self.fail(format!(
                "Failure in {}_reg: {} comparison for index {} - length {} vs {}",
                self.test_name,
                what,
                self.index,
                expected.len(),
                actual.len()
            ));
            return false;
        }

        if let Some(i) = first_difference(expected, actual) {
            self.fail(format!(
                "Failure in {}_reg: {} comparison for index {} - entry {}: expected {:?}, got {:?}",
                self.test_name, what, self.index, i, expected[i], actual[i]
            ));
            return false;
        }

        true
    }

    /// Write a buffer to file and check against golden file
    pub fn write_buffer_and_check(
        &mut self,
        buffer: &PixelBuffer,
        format: ImageFormat,
    ) -> TestResult<()> {
        self.index += 1;

        let local_path = self.local_path(format.extension());
        histeq_io::write_image(buffer, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        self.check_file(&local_path)
    }

    /// Write data to file and check against golden file
    ///
    /// # Arguments
    ///
    /// * `data` - Data to write
    /// * `ext` - File extension (e.g., "hist", "table")
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = self.local_path(ext);
        fs::write(&local_path, data)?;
        self.check_file(&local_path)
    }

    fn local_path(&self, ext: &str) -> String {
        format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        )
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with the golden file; a golden file that
    /// does not exist yet is seeded from the local file.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    fs::copy(local_path, &golden_path)?;
                    eprintln!("Seeded missing golden file: {}", golden_path);
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                // Encoders may differ byte-wise; fall back to decoded pixels
                if local_data != golden_data && !same_image_files(local_path, &golden_path) {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.fail(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn first_difference<T: PartialEq>(a: &[T], b: &[T]) -> Option<usize> {
    a.iter().zip(b).position(|(x, y)| x != y)
}

fn same_image_files(path1: &str, path2: &str) -> bool {
    match (
        histeq_io::load_grayscale_image(path1),
        histeq_io::load_grayscale_image(path2),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
