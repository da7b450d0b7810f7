//! Index-range partitioning for parallel workers
//!
//! A [`Partition`] splits `[0, len)` into exactly `workers` contiguous,
//! disjoint ranges that together cover the whole interval. Range sizes
//! differ by at most one: the first `len % workers` ranges hold one extra
//! index. When `workers > len` the trailing ranges are empty.

use crate::error::{Error, Result};
use std::ops::Range;

/// Disjoint, covering split of an index range.
///
/// # Examples
///
/// ```
/// use histeq_core::Partition;
///
/// let p = Partition::new(10, 3).unwrap();
/// assert_eq!(p.ranges(), &[0..4, 4..7, 7..10]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    ranges: Vec<Range<usize>>,
}

impl Partition {
    /// Split `[0, len)` into `workers` ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerCount`] if `workers` is 0, or
    /// [`Error::AllocationFailed`] if the range table cannot be allocated.
    pub fn new(len: usize, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidWorkerCount(workers));
        }

        let mut ranges = Vec::new();
        ranges
            .try_reserve_exact(workers)
            .map_err(|_| Error::AllocationFailed {
                bytes: workers.saturating_mul(std::mem::size_of::<Range<usize>>()),
            })?;

        let base = len / workers;
        let extra = len % workers;
        let mut start = 0;
        for i in 0..workers {
            let size = base + usize::from(i < extra);
            ranges.push(start..start + size);
            start += size;
        }
        debug_assert_eq!(start, len);

        Ok(Self { len, ranges })
    }

    /// Get the length of the partitioned interval.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the partitioned interval is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of ranges (one per worker).
    #[inline]
    pub fn workers(&self) -> usize {
        self.ranges.len()
    }

    /// Get all ranges in ascending order.
    #[inline]
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Get the range assigned to `worker`.
    pub fn range(&self, worker: usize) -> Option<Range<usize>> {
        self.ranges.get(worker).cloned()
    }

    /// Number of ranges that actually hold indices.
    pub fn active_workers(&self) -> usize {
        self.ranges.iter().filter(|r| !r.is_empty()).count()
    }

    /// Split `data` into one shared sub-slice per range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len()` differs from
    /// the partitioned length.
    pub fn split<'a, T>(&self, data: &'a [T]) -> Result<Vec<&'a [T]>> {
        self.check_len(data.len())?;
        Ok(self.ranges.iter().map(|r| &data[r.clone()]).collect())
    }

    /// Split `data` into one exclusive sub-slice per range.
    ///
    /// The returned slices never alias, so each can be handed to a
    /// different worker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len()` differs from
    /// the partitioned length.
    pub fn split_mut<'a, T>(&self, data: &'a mut [T]) -> Result<Vec<&'a mut [T]>> {
        self.check_len(data.len())?;
        let mut parts = Vec::with_capacity(self.ranges.len());
        let mut rest = data;
        for r in &self.ranges {
            let (head, tail) = rest.split_at_mut(r.len());
            parts.push(head);
            rest = tail;
        }
        Ok(parts)
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual != self.len {
            return Err(Error::BufferSizeMismatch {
                expected: self.len,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covering(p: &Partition) {
        let mut next = 0;
        for r in p.ranges() {
            assert_eq!(r.start, next, "gap or overlap at {}", next);
            next = r.end;
        }
        assert_eq!(next, p.len());
    }

    #[test]
    fn test_even_split() {
        let p = Partition::new(12, 4).unwrap();
        assert_eq!(p.ranges(), &[0..3, 3..6, 6..9, 9..12]);
        assert_covering(&p);
    }

    #[test]
    fn test_uneven_split() {
        let p = Partition::new(10, 4).unwrap();
        assert_eq!(p.ranges(), &[0..3, 3..6, 6..8, 8..10]);
        assert_covering(&p);
    }

    #[test]
    fn test_more_workers_than_items() {
        let p = Partition::new(3, 10).unwrap();
        assert_eq!(p.workers(), 10);
        assert_eq!(p.active_workers(), 3);
        assert!(p.ranges()[3..].iter().all(|r| r.is_empty()));
        assert_covering(&p);
    }

    #[test]
    fn test_single_worker() {
        let p = Partition::new(7, 1).unwrap();
        assert_eq!(p.ranges(), &[0..7]);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            Partition::new(7, 0),
            Err(Error::InvalidWorkerCount(0))
        ));
    }

    #[test]
    fn test_split_mut_disjoint() {
        let p = Partition::new(5, 2).unwrap();
        let mut data = [0u8; 5];
        for (i, part) in p.split_mut(&mut data).unwrap().into_iter().enumerate() {
            part.fill(i as u8 + 1);
        }
        assert_eq!(data, [1, 1, 1, 2, 2]);
    }

    #[test]
    fn test_split_length_mismatch() {
        let p = Partition::new(5, 2).unwrap();
        assert!(p.split(&[0u8; 4]).is_err());
    }

    #[test]
    fn test_huge_worker_count_fails_allocation() {
        assert!(matches!(
            Partition::new(4, usize::MAX),
            Err(Error::AllocationFailed { .. })
        ));
    }
}
