//! Frame partitioning: one contiguous row range per worker.

use std::ops::Range;

/// Split `height` rows into at most `workers` contiguous ranges of
/// `ceil(height / workers)` rows each; the last range may be shorter.
/// Reassembling the ranges in any order covers every row exactly once.
pub fn row_ranges(height: u32, workers: usize) -> Vec<Range<u32>> {
    if height == 0 {
        return Vec::new();
    }
    let workers = workers.max(1) as u32;
    let rows_per_range = height.div_ceil(workers);

    (0..height)
        .step_by(rows_per_range as usize)
        .map(|start| start..(start + rows_per_range).min(height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered_rows(ranges: &[Range<u32>]) -> Vec<u32> {
        let mut rows: Vec<u32> = ranges.iter().cloned().flatten().collect();
        rows.sort_unstable();
        rows
    }

    #[test]
    fn ranges_cover_every_row_exactly_once() {
        for (height, workers) in [(600, 8), (601, 8), (7, 3), (1, 16), (1080, 1)] {
            let ranges = row_ranges(height, workers);
            assert_eq!(
                covered_rows(&ranges),
                (0..height).collect::<Vec<_>>(),
                "height {height}, workers {workers}"
            );
            assert!(ranges.len() <= workers.max(1));
        }
    }

    #[test]
    fn last_range_may_be_shorter() {
        let ranges = row_ranges(10, 4);
        // ceil(10/4) = 3 rows per range: 0..3, 3..6, 6..9, 9..10
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[3], 9..10);
    }

    #[test]
    fn fewer_rows_than_workers() {
        let ranges = row_ranges(3, 8);
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(|r| r.len() == 1));
    }

    #[test]
    fn zero_height_yields_no_ranges() {
        assert!(row_ranges(0, 4).is_empty());
    }
}
