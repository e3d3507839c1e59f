use std::ops::Range;

/// A half-open interval `[start, end)` over the flat output index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkRange {
    pub start: usize,
    pub end: usize,
}

impl WorkRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {} > end {}", start, end);
        WorkRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, k: usize) -> bool {
        self.start <= k && k < self.end
    }

    /// The flat indices covered by this range.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Compute the contiguous slice of `[0, total_units)` owned by `worker_id`.
///
/// Every worker gets `total_units / total_workers` units; worker 0 also takes
/// the `total_units % total_workers` leftover units, so later ranges are
/// shifted right by the remainder. When `total_units < total_workers` all
/// workers other than 0 receive an empty range.
///
/// # Panics
/// Panics if `total_workers == 0` or `worker_id >= total_workers`.
pub fn compute_range(worker_id: usize, total_workers: usize, total_units: usize) -> WorkRange {
    assert!(total_workers >= 1, "need at least one worker");
    assert!(
        worker_id < total_workers,
        "worker id {} out of range for {} workers",
        worker_id,
        total_workers
    );

    let base = total_units / total_workers;
    let remainder = total_units % total_workers;

    if worker_id == 0 {
        WorkRange::new(0, base + remainder)
    } else {
        WorkRange::new(base * worker_id + remainder, base * (worker_id + 1) + remainder)
    }
}

/// All ranges for `total_workers` workers, in worker-id order.
pub fn partition(total_workers: usize, total_units: usize) -> Vec<WorkRange> {
    (0..total_workers)
        .map(|id| compute_range(id, total_workers, total_units))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(ranges: &[WorkRange], total_units: usize) {
        let mut expected_start = 0;
        for r in ranges {
            assert_eq!(r.start, expected_start, "gap or overlap in {:?}", ranges);
            assert!(r.start <= r.end);
            expected_start = r.end;
        }
        assert_eq!(expected_start, total_units);
    }

    #[test]
    fn test_even_split() {
        let ranges = partition(4, 12);
        assert_eq!(
            ranges,
            vec![
                WorkRange::new(0, 3),
                WorkRange::new(3, 6),
                WorkRange::new(6, 9),
                WorkRange::new(9, 12),
            ]
        );
    }

    #[test]
    fn test_remainder_goes_to_worker_zero() {
        let ranges = partition(3, 11);
        assert_eq!(ranges[0], WorkRange::new(0, 5));
        assert_eq!(ranges[1], WorkRange::new(5, 8));
        assert_eq!(ranges[2], WorkRange::new(8, 11));
    }

    #[test]
    fn test_more_workers_than_units() {
        let ranges = partition(5, 3);
        assert_eq!(ranges[0], WorkRange::new(0, 3));
        for r in &ranges[1..] {
            assert!(r.is_empty());
        }
        assert_exact_cover(&ranges, 3);
    }

    #[test]
    fn test_zero_units() {
        let ranges = partition(4, 0);
        assert!(ranges.iter().all(WorkRange::is_empty));
        assert_exact_cover(&ranges, 0);
    }

    #[test]
    fn test_single_worker_owns_everything() {
        assert_eq!(compute_range(0, 1, 42), WorkRange::new(0, 42));
    }

    #[test]
    fn test_disjoint_and_complete() {
        for total_workers in 1..=16 {
            for total_units in 0..200 {
                let ranges = partition(total_workers, total_units);
                assert_eq!(ranges.len(), total_workers);
                assert_exact_cover(&ranges, total_units);

                let mut hits = vec![0u8; total_units];
                for r in &ranges {
                    for k in r.indices() {
                        hits[k] += 1;
                    }
                }
                assert!(hits.iter().all(|&h| h == 1));
            }
        }
    }

    #[test]
    fn test_range_helpers() {
        let r = WorkRange::new(3, 7);
        assert_eq!(r.len(), 4);
        assert!(!r.is_empty());
        assert!(r.contains(3));
        assert!(r.contains(6));
        assert!(!r.contains(7));
        assert_eq!(r.indices().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
    }

    #[test]
    #[should_panic]
    fn test_worker_id_out_of_range_panics() {
        let _ = compute_range(4, 4, 10);
    }
}
