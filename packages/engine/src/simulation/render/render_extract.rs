//! Pull-based rendering: the host asks which chunks are dirty, pulls their
//! pixels, uploads them and then consumes the flag.

use crate::common::{EngineError, EngineResult};
use crate::domain::CellState;

use super::WorldCore;

pub const RGBA_BYTES_PER_CELL: usize = 4;

/// Display colour of a cell state, RGBA8.
#[inline]
pub fn cell_color(state: CellState) -> [u8; 4] {
    match state {
        CellState::Empty => [0x12, 0x12, 0x18, 0xFF],
        CellState::Solid => [0x80, 0x80, 0x80, 0xFF],
        CellState::Sand => [0xFF, 0xEB, 0x04, 0xFF],
        CellState::Water => [0x28, 0x64, 0xE6, 0xFF],
    }
}

/// Sleeping chunks are drawn at half brightness in the debug view.
#[inline]
fn tinted([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    [r >> 1, g >> 1, b >> 1, a]
}

pub(super) fn dirty_chunk_ids(world: &WorldCore) -> Vec<usize> {
    world
        .chunks
        .iter()
        .filter(|c| c.is_render_dirty())
        .map(|c| c.id())
        .collect()
}

pub(super) fn extract_chunk_rgba(world: &WorldCore, chunk_id: usize, out: &mut Vec<u8>) -> EngineResult<()> {
    let chunk = world.chunk(chunk_id)?;
    let (origin_x, origin_y) = chunk.origin();
    let size = world.layout.chunk_size() as usize;
    let tint = world.config.render.tint_sleeping_chunks && !chunk.is_physics_awake();

    out.clear();
    out.reserve(size * size * RGBA_BYTES_PER_CELL);

    let cells = world.grid.cells();
    for ly in 0..size {
        let row = world.layout.index(origin_x, origin_y + ly as u32);
        for &cell in &cells[row..row + size] {
            let color = cell_color(cell);
            out.extend_from_slice(&if tint { tinted(color) } else { color });
        }
    }
    Ok(())
}

pub(super) fn consume_render_dirty(world: &mut WorldCore, chunk_id: usize) -> EngineResult<bool> {
    let count = world.chunks.len();
    world
        .chunks
        .get_mut(chunk_id)
        .map(|c| c.consume_render_dirty())
        .ok_or(EngineError::UnknownChunk { id: chunk_id, count })
}
