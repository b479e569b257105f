// ── Bold annotation set ───────────────────────────────────────────────────────
//
// Pure Rust bookkeeping for the character ranges rendered in bold.  The text
// control owns the actual formatting; this set is the session's copy of it and
// is never written to disk.

use std::ops::Range;

/// Sorted, disjoint, non-touching half-open character ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoldSet {
    ranges: Vec<Range<usize>>,
}

impl BoldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bold ranges in ascending order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// `true` when every character of the non-empty `range` is bold.
    pub fn covers(&self, range: &Range<usize>) -> bool {
        if range.start >= range.end {
            return false;
        }
        // Touching ranges are always merged, so full coverage means a single
        // stored range contains the query.
        self.ranges
            .iter()
            .any(|r| r.start <= range.start && range.end <= r.end)
    }

    /// Mark `range` bold, merging with any range it overlaps or touches.
    pub fn add(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let (mut start, mut end) = (range.start, range.end);
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for r in self.ranges.drain(..) {
            if r.end < start || r.start > end {
                kept.push(r);
            } else {
                start = start.min(r.start);
                end = end.max(r.end);
            }
        }
        let at = kept.partition_point(|r| r.start < start);
        kept.insert(at, start..end);
        self.ranges = kept;
    }

    /// Remove bold from `range`, splitting any range that straddles it.
    pub fn remove(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for r in self.ranges.drain(..) {
            if r.end <= range.start || r.start >= range.end {
                kept.push(r);
                continue;
            }
            if r.start < range.start {
                kept.push(r.start..range.start);
            }
            if range.end < r.end {
                kept.push(range.end..r.end);
            }
        }
        self.ranges = kept;
    }

    /// Adjust for `count` characters inserted at `pos`.
    ///
    /// Text inserted strictly inside a bold range becomes part of it; text
    /// inserted at either edge does not.
    pub fn on_insert(&mut self, pos: usize, count: usize) {
        if count == 0 {
            return;
        }
        for r in &mut self.ranges {
            if pos <= r.start {
                r.start += count;
                r.end += count;
            } else if pos < r.end {
                r.end += count;
            }
        }
    }

    /// Adjust for the characters in `deleted` having been removed.
    pub fn on_delete(&mut self, deleted: Range<usize>) {
        if deleted.start >= deleted.end {
            return;
        }
        let len = deleted.end - deleted.start;
        let map = |p: usize| {
            if p <= deleted.start {
                p
            } else if p >= deleted.end {
                p - len
            } else {
                deleted.start
            }
        };
        let shifted: Vec<Range<usize>> = self
            .ranges
            .drain(..)
            .map(|r| map(r.start)..map(r.end))
            .filter(|r| r.start < r.end)
            .collect();
        // Deleting the gap between two ranges leaves them touching.
        for r in shifted {
            self.add(r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ranges: &[Range<usize>]) -> BoldSet {
        let mut s = BoldSet::new();
        for r in ranges {
            s.add(r.clone());
        }
        s
    }

    #[test]
    fn add_merges_overlapping_and_touching() {
        let s = set(&[0..3, 5..8, 3..4, 7..10]);
        assert_eq!(s.ranges(), &[0..4, 5..10]);
    }

    #[test]
    fn add_ignores_empty_range() {
        let s = set(&[4..4]);
        assert!(s.is_empty());
    }

    #[test]
    fn remove_splits_straddled_range() {
        let mut s = set(&[0..10]);
        s.remove(3..6);
        assert_eq!(s.ranges(), &[0..3, 6..10]);
    }

    #[test]
    fn remove_across_several_ranges() {
        let mut s = set(&[0..2, 4..6, 8..12]);
        s.remove(1..9);
        assert_eq!(s.ranges(), &[0..1, 9..12]);
    }

    #[test]
    fn covers_requires_whole_range() {
        let s = set(&[2..6]);
        assert!(s.covers(&(2..6)));
        assert!(s.covers(&(3..4)));
        assert!(!s.covers(&(1..4)));
        assert!(!s.covers(&(5..7)));
        assert!(!s.covers(&(3..3)));
    }

    #[test]
    fn insert_before_shifts_inside_grows_after_ignores() {
        let mut s = set(&[4..8]);
        s.on_insert(0, 2);
        assert_eq!(s.ranges(), &[6..10]);
        s.on_insert(7, 3);
        assert_eq!(s.ranges(), &[6..13]);
        s.on_insert(13, 5);
        assert_eq!(s.ranges(), &[6..13]);
        s.on_insert(6, 1);
        assert_eq!(s.ranges(), &[7..14]);
    }

    #[test]
    fn delete_clips_shifts_and_drops() {
        let mut s = set(&[0..4, 6..8, 10..14]);
        s.on_delete(2..11);
        // 0..4 → 0..2, 6..8 vanishes, 10..14 → 2..5; touching → merged.
        assert_eq!(s.ranges(), &[0..5]);
    }

    #[test]
    fn delete_after_all_ranges_is_noop() {
        let mut s = set(&[0..3]);
        s.on_delete(5..9);
        assert_eq!(s.ranges(), &[0..3]);
    }
}
