//! Phase partitioning.
//!
//! Chunks are grouped by `(x mod 3, y mod 3)` into nine phases. Two distinct
//! chunks in one phase are at least three chunk widths apart on some axis, so
//! the one-cell halos of chunks running concurrently never touch. This is
//! the only thing that makes lock-free chunk updates sound; the modulus must
//! stay at 3 as long as rules reach one cell past the chunk edge.
//!
//! ```text
//! ┌───┬───┬───┬───┬───┬───┐
//! │ 0 │ 1 │ 2 │ 0 │ 1 │ 2 │
//! ├───┼───┼───┼───┼───┼───┤
//! │ 3 │ 4 │ 5 │ 3 │ 4 │ 5 │
//! ├───┼───┼───┼───┼───┼───┤
//! │ 6 │ 7 │ 8 │ 6 │ 7 │ 8 │
//! └───┴───┴───┴───┴───┴───┘
//! ```

use super::{ChunkCoord, ChunkLayout};

pub const PHASE_MODULUS: u32 = 3;
pub const PHASE_COUNT: usize = (PHASE_MODULUS * PHASE_MODULUS) as usize;

/// Phase of a chunk: its coordinates modulo 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhaseKey {
    row: u8,
    col: u8,
}

impl PhaseKey {
    /// All phases in dispatch order (row-major over the 3x3 key space).
    pub const ALL: [PhaseKey; PHASE_COUNT] = [
        PhaseKey { row: 0, col: 0 },
        PhaseKey { row: 0, col: 1 },
        PhaseKey { row: 0, col: 2 },
        PhaseKey { row: 1, col: 0 },
        PhaseKey { row: 1, col: 1 },
        PhaseKey { row: 1, col: 2 },
        PhaseKey { row: 2, col: 0 },
        PhaseKey { row: 2, col: 1 },
        PhaseKey { row: 2, col: 2 },
    ];

    #[inline]
    pub fn of(coord: ChunkCoord) -> Self {
        Self {
            row: (coord.y % PHASE_MODULUS) as u8,
            col: (coord.x % PHASE_MODULUS) as u8,
        }
    }

    /// Position in the dispatch order.
    #[inline]
    pub fn index(self) -> usize {
        self.row as usize * PHASE_MODULUS as usize + self.col as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Chunks of each phase, indexed by [`PhaseKey::index`], each in chunk-id order.
///
/// Pure function of the layout; nothing caches it.
pub fn phase_groups(layout: &ChunkLayout) -> [Vec<ChunkCoord>; PHASE_COUNT] {
    let mut groups: [Vec<ChunkCoord>; PHASE_COUNT] = std::array::from_fn(|_| Vec::new());
    for id in 0..layout.chunk_count() {
        let coord = layout.chunk_coord(id);
        groups[PhaseKey::of(coord).index()].push(coord);
    }
    groups
}

/// Chebyshev distance between two chunks, in chunk units.
#[inline]
pub fn chebyshev_distance(a: ChunkCoord, b: ChunkCoord) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_order_is_row_major() {
        for (i, key) in PhaseKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(PhaseKey::from_index(i), Some(*key));
        }
        assert_eq!(PhaseKey::from_index(PHASE_COUNT), None);
        assert_eq!(PhaseKey::of(ChunkCoord::new(4, 5)).index(), 2 * 3 + 1);
    }

    #[test]
    fn groups_partition_every_chunk_once() {
        let layout = ChunkLayout::new(7, 5, 4).unwrap();
        let groups = phase_groups(&layout);

        let mut seen = vec![0u32; layout.chunk_count()];
        for (index, group) in groups.iter().enumerate() {
            for coord in group {
                assert_eq!(PhaseKey::of(*coord).index(), index);
                seen[layout.chunk_id(*coord)] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn same_phase_chunks_are_never_neighbours() {
        let layout = ChunkLayout::new(10, 9, 2).unwrap();
        for group in phase_groups(&layout).iter() {
            for (i, a) in group.iter().enumerate() {
                for b in &group[i + 1..] {
                    assert!(
                        chebyshev_distance(*a, *b) >= 3,
                        "{:?} and {:?} share a phase but are too close",
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn small_worlds_leave_phases_empty() {
        let layout = ChunkLayout::new(1, 2, 4).unwrap();
        let groups = phase_groups(&layout);
        assert_eq!(groups[0], vec![ChunkCoord::new(0, 0)]);
        assert_eq!(groups[3], vec![ChunkCoord::new(0, 1)]);
        let total: usize = groups.iter().map(Vec::len).sum();
        assert_eq!(total, 2);
    }
}
