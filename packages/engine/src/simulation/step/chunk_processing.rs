use crate::domain::CellState;
use crate::spatial::chunks::{ChangeTracker, Chunk, ChunkCoord, ChunkLayout};
use crate::spatial::grid::SharedCells;
use crate::systems::behaviors::{BehaviorRegistry, Neighborhood};

/// Neighborhood of one cell during a phase.
///
/// Every offset goes through `translate_across_boundary`, so targets in a
/// neighbouring chunk resolve to its global index and anything beyond the
/// one-cell halo or outside the world reads as blocked.
pub(super) struct UpdateContext<'a, 'g> {
    layout: &'a ChunkLayout,
    cells: &'a SharedCells<'g>,
    tracker: &'a ChangeTracker,
    chunk: ChunkCoord,
    local_x: i32,
    local_y: i32,
    index: usize,
}

impl UpdateContext<'_, '_> {
    #[inline]
    fn target(&self, dx: i32, dy: i32) -> Option<usize> {
        self.layout
            .translate_across_boundary(self.chunk, self.local_x + dx, self.local_y + dy)
    }
}

impl Neighborhood for UpdateContext<'_, '_> {
    #[inline]
    fn peek(&self, dx: i32, dy: i32) -> Option<CellState> {
        let target = self.target(dx, dy)?;
        // SAFETY: target is within this chunk's halo; no same-phase task reaches it.
        unsafe { self.cells.read(target) }
    }

    #[inline]
    fn written(&self, dx: i32, dy: i32) -> bool {
        self.target(dx, dy).map_or(true, |t| self.tracker.is_set(t))
    }

    #[inline]
    fn swap_with(&mut self, dx: i32, dy: i32) -> bool {
        let Some(target) = self.target(dx, dy) else {
            return false;
        };
        // SAFETY: as in `peek`; the source cell belongs to this chunk.
        if !unsafe { self.cells.swap(self.index, target) } {
            return false;
        }
        self.tracker.mark(self.index);
        self.tracker.mark(target);
        true
    }
}

/// Run the rule set over one chunk in row-major order. Returns cells moved.
pub(super) fn process_chunk(
    chunk: &mut Chunk,
    layout: &ChunkLayout,
    cells: &SharedCells<'_>,
    tracker: &ChangeTracker,
    behaviors: &BehaviorRegistry,
) -> usize {
    let coord = chunk.coord();
    let (origin_x, origin_y) = chunk.origin();
    let size = layout.chunk_size();
    let rng = chunk.rng_mut();

    let mut moved = 0usize;
    for ly in 0..size {
        for lx in 0..size {
            let index = layout.index(origin_x + lx, origin_y + ly);
            // Already moved, or filled by a mover, this tick.
            if tracker.is_set(index) {
                continue;
            }
            // SAFETY: index is inside this chunk.
            let Some(cell) = (unsafe { cells.read(index) }) else {
                continue;
            };
            if !cell.is_mobile() {
                continue;
            }

            let mut ctx = UpdateContext {
                layout,
                cells,
                tracker,
                chunk: coord,
                local_x: lx as i32,
                local_y: ly as i32,
                index,
            };
            if behaviors.update(cell, &mut ctx, rng) {
                moved += 1;
            }
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleOptions;
    use crate::spatial::grid::CellGrid;

    #[test]
    fn sand_crosses_into_the_chunk_below() {
        let layout = ChunkLayout::new(1, 2, 4).unwrap();
        let mut grid = CellGrid::new(layout.width(), layout.height());
        grid.set(2, 3, CellState::Sand).unwrap();
        let tracker = ChangeTracker::new(layout.cell_count());
        let behaviors = BehaviorRegistry::new(RuleOptions::default());
        let mut chunk = Chunk::new(&layout, ChunkCoord::new(0, 0), 1);

        let moved = {
            let cells = grid.shared();
            process_chunk(&mut chunk, &layout, &cells, &tracker, &behaviors)
        };

        assert_eq!(moved, 1);
        assert_eq!(grid.get(2, 3).unwrap(), CellState::Empty);
        assert_eq!(grid.get(2, 4).unwrap(), CellState::Sand);
        assert!(tracker.is_set(layout.index(2, 3)));
        assert!(tracker.is_set(layout.index(2, 4)));
        assert_eq!(tracker.count_set(), 2);
    }

    #[test]
    fn a_grain_falls_one_row_per_pass() {
        let layout = ChunkLayout::new(1, 1, 8).unwrap();
        let mut grid = CellGrid::new(8, 8);
        grid.set(4, 0, CellState::Sand).unwrap();
        let tracker = ChangeTracker::new(layout.cell_count());
        let behaviors = BehaviorRegistry::default();
        let mut chunk = Chunk::new(&layout, ChunkCoord::new(0, 0), 1);

        {
            let cells = grid.shared();
            process_chunk(&mut chunk, &layout, &cells, &tracker, &behaviors);
        }
        assert_eq!(grid.get(4, 1).unwrap(), CellState::Sand);
        assert_eq!(grid.counts()[CellState::Sand.id() as usize], 1);
    }

    #[test]
    fn world_floor_blocks_without_wrapping() {
        let layout = ChunkLayout::new(1, 1, 4).unwrap();
        let mut grid = CellGrid::new(4, 4);
        // Walled in at the bottom-left corner.
        grid.set(0, 3, CellState::Sand).unwrap();
        grid.set(1, 3, CellState::Solid).unwrap();
        let tracker = ChangeTracker::new(layout.cell_count());
        let behaviors = BehaviorRegistry::default();
        let mut chunk = Chunk::new(&layout, ChunkCoord::new(0, 0), 9);

        let moved = {
            let cells = grid.shared();
            process_chunk(&mut chunk, &layout, &cells, &tracker, &behaviors)
        };
        assert_eq!(moved, 0);
        assert_eq!(grid.get(0, 3).unwrap(), CellState::Sand);
        assert_eq!(grid.get(0, 0).unwrap(), CellState::Empty);
        assert!(tracker.is_clear());
    }
}
