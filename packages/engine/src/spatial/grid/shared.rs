//! Lock-free view of the cell buffer used while a phase runs.
//!
//! # Safety
//! `SharedCells` hands out unsynchronized reads and writes. It is sound only
//! under the phase schedule: chunks dispatched together are three chunk
//! widths apart and every access stays within one cell of the owning chunk,
//! so no two tasks ever touch the same cell. The view borrows the grid
//! mutably, so nothing else can observe the buffer while it exists.

use std::marker::PhantomData;

use crate::domain::CellState;

pub struct SharedCells<'a> {
    ptr: *mut CellState,
    len: usize,
    _marker: PhantomData<&'a mut [CellState]>,
}

// SAFETY: see module docs; disjointness of concurrent accesses is
// guaranteed by the phase partitioning, not by this type.
unsafe impl Send for SharedCells<'_> {}
unsafe impl Sync for SharedCells<'_> {}

impl<'a> SharedCells<'a> {
    pub fn new(cells: &'a mut [CellState]) -> Self {
        Self {
            ptr: cells.as_mut_ptr(),
            len: cells.len(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize { self.len }

    #[inline]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Read one cell. `None` for an out-of-range index (release builds).
    ///
    /// # Safety
    /// No other task may be writing `index` concurrently.
    #[inline]
    pub unsafe fn read(&self, index: usize) -> Option<CellState> {
        let index = guarded_slot!(index, self.len)?;
        // SAFETY: index < len, and the caller rules out concurrent writers.
        Some(unsafe { *self.ptr.add(index) })
    }

    /// Swap two cells. Returns `false` without writing if either index is
    /// out of range (release builds).
    ///
    /// # Safety
    /// No other task may be reading or writing `a` or `b` concurrently.
    #[inline]
    pub unsafe fn swap(&self, a: usize, b: usize) -> bool {
        let (Some(a), Some(b)) = (guarded_slot!(a, self.len), guarded_slot!(b, self.len)) else {
            return false;
        };
        // SAFETY: both in range; `ptr::swap` tolerates a == b.
        unsafe { std::ptr::swap(self.ptr.add(a), self.ptr.add(b)) };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_swap_hit_the_underlying_buffer() {
        let mut cells = vec![CellState::Sand, CellState::Empty, CellState::Water];
        {
            let shared = SharedCells::new(&mut cells);
            assert_eq!(shared.len(), 3);
            unsafe {
                assert_eq!(shared.read(0), Some(CellState::Sand));
                assert!(shared.swap(0, 1));
                assert_eq!(shared.read(1), Some(CellState::Sand));
            }
        }
        assert_eq!(cells, vec![CellState::Empty, CellState::Sand, CellState::Water]);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn out_of_range_swap_is_blocked_in_release() {
        let mut cells = vec![CellState::Sand, CellState::Empty];
        let shared = SharedCells::new(&mut cells);
        unsafe {
            assert_eq!(shared.read(2), None);
            assert!(!shared.swap(0, 2));
        }
        drop(shared);
        assert_eq!(cells, vec![CellState::Sand, CellState::Empty]);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn out_of_range_swap_panics_in_debug() {
        let mut cells = vec![CellState::Sand, CellState::Empty];
        let shared = SharedCells::new(&mut cells);
        unsafe {
            shared.swap(0, 2);
        }
    }
}
