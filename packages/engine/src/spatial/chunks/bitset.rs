//! Change Tracker - one bit per grid cell, rebuilt every tick.
//!
//! Chunks running in the same phase never share a cell, but with row-major
//! packing two of them can share a 64-bit word. Words are therefore atomics
//! updated with `fetch_or`; ordering between phases comes from the phase join.

use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::PixelRect;

#[derive(Debug)]
pub struct ChangeTracker {
    words: Vec<AtomicU64>,
    len: usize,
}

impl ChangeTracker {
    pub fn new(len: usize) -> Self {
        let word_count = (len + 63) / 64;
        Self {
            words: (0..word_count).map(|_| AtomicU64::new(0)).collect(),
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize { self.len }

    #[inline]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Reset every bit. Reuses the allocation.
    pub fn clear(&mut self) {
        #[cfg(feature = "parallel")]
        {
            self.words.par_iter_mut().for_each(|w| *w.get_mut() = 0);
        }
        #[cfg(not(feature = "parallel"))]
        {
            for w in self.words.iter_mut() {
                *w.get_mut() = 0;
            }
        }
    }

    // === Bit access ===

    /// Record that cell `idx` was written this tick.
    /// Returns `false` (and records nothing) for an out-of-range index.
    #[inline]
    pub fn mark(&self, idx: usize) -> bool {
        let Some(idx) = guarded_slot!(idx, self.len) else {
            return false;
        };
        let word = idx >> 6; // idx / 64
        let bit = idx & 63; // idx % 64
        self.words[word].fetch_or(1u64 << bit, Ordering::Relaxed);
        true
    }

    /// Out-of-range indices read as unset (release) or panic (debug).
    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        let Some(idx) = guarded_slot!(idx, self.len) else {
            return false;
        };
        let word = idx >> 6;
        let bit = idx & 63;
        self.words[word].load(Ordering::Relaxed) & (1u64 << bit) != 0
    }

    // === Range queries ===

    /// Any bit set in `start..end`?
    pub fn any_in_range(&self, start: usize, end: usize) -> bool {
        let end = end.min(self.len);
        if start >= end {
            return false;
        }

        let first = start >> 6;
        let last = (end - 1) >> 6;
        for word in first..=last {
            let mut mask = !0u64;
            if word == first {
                mask &= !0u64 << (start & 63);
            }
            if word == last {
                let hi = ((end - 1) & 63) + 1;
                if hi < 64 {
                    mask &= (1u64 << hi) - 1;
                }
            }
            if self.words[word].load(Ordering::Relaxed) & mask != 0 {
                return true;
            }
        }
        false
    }

    /// Any bit set inside `rect` of a grid `width` cells wide?
    pub fn any_in_rect(&self, rect: PixelRect, width: u32) -> bool {
        let width = width as usize;
        (rect.y0..rect.y1).any(|y| {
            let row = y as usize * width;
            self.any_in_range(row + rect.x0 as usize, row + rect.x1 as usize)
        })
    }

    pub fn count_set(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    pub fn is_clear(&self) -> bool {
        self.words.iter().all(|w| w.load(Ordering::Relaxed) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_query_single_bits() {
        let tracker = ChangeTracker::new(130);
        assert!(tracker.is_clear());

        assert!(tracker.mark(0));
        assert!(tracker.mark(63));
        assert!(tracker.mark(64));
        assert!(tracker.mark(129));

        assert!(tracker.is_set(0));
        assert!(tracker.is_set(63));
        assert!(tracker.is_set(64));
        assert!(tracker.is_set(129));
        assert!(!tracker.is_set(1));
        assert_eq!(tracker.count_set(), 4);
    }

    #[test]
    fn marking_twice_counts_once() {
        let tracker = ChangeTracker::new(10);
        tracker.mark(3);
        tracker.mark(3);
        assert_eq!(tracker.count_set(), 1);
    }

    #[test]
    fn clear_resets_without_shrinking() {
        let mut tracker = ChangeTracker::new(200);
        for i in (0..200).step_by(7) {
            tracker.mark(i);
        }
        tracker.clear();
        assert!(tracker.is_clear());
        assert_eq!(tracker.len(), 200);
    }

    #[test]
    fn range_query_respects_word_edges() {
        let tracker = ChangeTracker::new(256);
        tracker.mark(100);

        assert!(tracker.any_in_range(100, 101));
        assert!(tracker.any_in_range(64, 128));
        assert!(tracker.any_in_range(0, 256));
        assert!(!tracker.any_in_range(0, 100));
        assert!(!tracker.any_in_range(101, 256));
        assert!(!tracker.any_in_range(100, 100));
        // Spans several words without touching bit 100.
        assert!(!tracker.any_in_range(101, 200));

        tracker.mark(191);
        assert!(tracker.any_in_range(150, 192));
        assert!(!tracker.any_in_range(150, 191));
    }

    #[test]
    fn rect_query_checks_only_rect_rows() {
        // 8x4 grid
        let tracker = ChangeTracker::new(32);
        tracker.mark(2 * 8 + 5); // (5, 2)

        let inside = PixelRect { x0: 4, y0: 0, x1: 8, y1: 4 };
        let left = PixelRect { x0: 0, y0: 0, x1: 4, y1: 4 };
        let above = PixelRect { x0: 4, y0: 0, x1: 8, y1: 2 };
        assert!(tracker.any_in_rect(inside, 8));
        assert!(!tracker.any_in_rect(left, 8));
        assert!(!tracker.any_in_rect(above, 8));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn out_of_range_mark_is_refused_in_release() {
        let tracker = ChangeTracker::new(8);
        assert!(!tracker.mark(8));
        assert!(tracker.is_clear());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn out_of_range_query_reads_unset_in_release() {
        let tracker = ChangeTracker::new(130);
        assert!(!tracker.is_set(130));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    #[cfg(debug_assertions)]
    fn out_of_range_query_panics_in_debug() {
        let tracker = ChangeTracker::new(130);
        let _ = tracker.is_set(130);
    }
}
