//! Cell Grid - one flat, row-major buffer of cell states for the whole world.
//!
//! index = y * width + x. No private copies exist anywhere; chunks address
//! this buffer through offset arithmetic only.

use crate::common::{EngineError, EngineResult};
use crate::domain::{CellState, CELL_STATE_COUNT};

mod indexing;
mod shared;

pub use shared::SharedCells;

pub struct CellGrid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl CellGrid {
    /// All-Empty grid. Dimensions come from a validated `ChunkLayout`.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![CellState::Empty; size],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> EngineResult<CellState> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Write a cell, returning its previous state.
    pub fn set(&mut self, x: u32, y: u32, state: CellState) -> EngineResult<CellState> {
        let idx = self.checked_index(x, y)?;
        Ok(std::mem::replace(&mut self.cells[idx], state))
    }

    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Per-state population, indexed by `CellState::id()`.
    pub fn counts(&self) -> [usize; CELL_STATE_COUNT] {
        let mut counts = [0usize; CELL_STATE_COUNT];
        for cell in &self.cells {
            counts[cell.id() as usize] += 1;
        }
        counts
    }

    /// Unsynchronized view for the duration of one phase.
    #[inline]
    pub(crate) fn shared(&mut self) -> SharedCells<'_> {
        SharedCells::new(&mut self.cells)
    }

    fn checked_index(&self, x: u32, y: u32) -> EngineResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(x, y))
    }
}

impl std::fmt::Debug for CellGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("counts", &self.counts())
            .finish()
    }
}
