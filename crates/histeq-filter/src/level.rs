//! Level remapping table from the cumulative distribution
//!
//! [`LevelMapper::map`] walks the histogram once in ascending level order,
//! keeping a running cumulative count `c`, and sets
//!
//! ```text
//! table[i] = floor(c_i * 255 / total)
//! ```
//!
//! Each entry depends on the running total of all lower levels, so the walk
//! is sequential. Integer arithmetic is exact: with a histogram that sums to
//! `total`, `c_255 == total` and `table[255] == 255`.

use crate::{FilterError, FilterResult};
use histeq_core::{Error, Histogram, LEVELS, MAX_LEVEL};
use std::ops::Index;

/// Monotonic mapping from old intensity to new intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTable {
    levels: [u8; LEVELS],
}

impl LevelTable {
    /// The table that leaves every level unchanged.
    pub fn identity() -> Self {
        let mut levels = [0u8; LEVELS];
        for (i, entry) in levels.iter_mut().enumerate() {
            *entry = i as u8;
        }
        Self { levels }
    }

    /// Wrap an explicit table.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if the entries decrease
    /// anywhere.
    pub fn from_array(levels: [u8; LEVELS]) -> FilterResult<Self> {
        let table = Self { levels };
        if let Some(i) = table.first_decrease() {
            return Err(FilterError::InvalidParameters(format!(
                "level table decreases at {}: {} > {}",
                i,
                levels[i],
                levels[i + 1]
            )));
        }
        Ok(table)
    }

    /// Get the new intensity for `level`.
    #[inline]
    pub fn get(&self, level: u8) -> u8 {
        self.levels[level as usize]
    }

    /// Get the whole table, indexed by old intensity.
    #[inline]
    pub fn as_array(&self) -> &[u8; LEVELS] {
        &self.levels
    }

    /// Check that `table[i] <= table[i + 1]` for every `i`.
    pub fn is_monotonic(&self) -> bool {
        self.first_decrease().is_none()
    }

    fn first_decrease(&self) -> Option<usize> {
        self.levels.windows(2).position(|w| w[0] > w[1])
    }
}

impl Index<u8> for LevelTable {
    type Output = u8;

    #[inline]
    fn index(&self, level: u8) -> &u8 {
        &self.levels[level as usize]
    }
}

/// Turns a histogram into a [`LevelTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelMapper;

impl LevelMapper {
    /// Compute the equalization table for `hist`.
    ///
    /// # Arguments
    ///
    /// * `hist` - Full histogram of the source image
    /// * `total_pixels` - Pixel count of the source image; must equal
    ///   `hist.total()`
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyImage`] if `total_pixels` is 0
    /// - [`Error::PixelCountMismatch`] if the histogram does not sum to
    ///   `total_pixels`
    pub fn map(hist: &Histogram, total_pixels: u64) -> FilterResult<LevelTable> {
        if total_pixels == 0 {
            return Err(Error::EmptyImage.into());
        }
        let actual = hist.total();
        if actual != total_pixels {
            return Err(Error::PixelCountMismatch {
                expected: total_pixels,
                actual,
            }
            .into());
        }

        let total = u128::from(total_pixels);
        let max = u128::from(MAX_LEVEL);
        let mut cumulative: u128 = 0;
        let mut levels = [0u8; LEVELS];
        for (entry, &count) in levels.iter_mut().zip(hist.counts().iter()) {
            cumulative += u128::from(count);
            // cumulative <= total, so the quotient is at most MAX_LEVEL
            *entry = (cumulative * max / total) as u8;
        }

        Ok(LevelTable { levels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist_with(pairs: &[(usize, u64)]) -> Histogram {
        let mut counts = [0u64; LEVELS];
        for &(level, count) in pairs {
            counts[level] = count;
        }
        Histogram::from_counts(counts)
    }

    #[test]
    fn test_four_levels_once_each() {
        let hist = hist_with(&[(0, 1), (85, 1), (170, 1), (255, 1)]);
        let table = LevelMapper::map(&hist, 4).unwrap();
        assert_eq!(table[0], 63);
        assert_eq!(table[84], 63);
        assert_eq!(table[85], 127);
        assert_eq!(table[170], 191);
        assert_eq!(table[254], 191);
        assert_eq!(table[255], 255);
    }

    #[test]
    fn test_uniform_single_bucket() {
        let hist = hist_with(&[(100, 64)]);
        let table = LevelMapper::map(&hist, 64).unwrap();
        assert_eq!(table[99], 0);
        assert_eq!(table[100], 255);
        assert_eq!(table[255], 255);
        assert!(table.is_monotonic());
    }

    #[test]
    fn test_anchored_and_monotonic() {
        let mut counts = [0u64; LEVELS];
        for (i, c) in counts.iter_mut().enumerate() {
            *c = ((i * 31 + 7) % 13) as u64;
        }
        let hist = Histogram::from_counts(counts);
        let table = LevelMapper::map(&hist, hist.total()).unwrap();
        assert!(table.is_monotonic());
        assert_eq!(table[255], 255);
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        let hist = hist_with(&[(0, u64::MAX / 2), (255, u64::MAX / 2)]);
        let table = LevelMapper::map(&hist, hist.total()).unwrap();
        assert_eq!(table[0], 127);
        assert_eq!(table[255], 255);
    }

    #[test]
    fn test_zero_total_rejected() {
        let err = LevelMapper::map(&Histogram::new(), 0).unwrap_err();
        assert!(matches!(err, FilterError::Core(Error::EmptyImage)));
    }

    #[test]
    fn test_total_mismatch_rejected() {
        let hist = hist_with(&[(3, 5)]);
        let err = LevelMapper::map(&hist, 6).unwrap_err();
        assert!(matches!(
            err,
            FilterError::Core(Error::PixelCountMismatch {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_identity_and_from_array() {
        let id = LevelTable::identity();
        assert!(id.is_monotonic());
        assert_eq!(id.get(17), 17);
        assert_eq!(LevelTable::from_array(*id.as_array()).unwrap(), id);

        let mut bad = *id.as_array();
        bad[10] = 200;
        assert!(LevelTable::from_array(bad).is_err());
    }
}
