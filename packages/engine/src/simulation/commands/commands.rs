//! Edits issued by the host between ticks.
//!
//! Every write lands in the grid directly and marks the owning chunk dirty.
//! With `wakeAdjacentChunks`, a write on a chunk edge also wakes the chunks
//! whose halo covers that cell.

use crate::common::EngineResult;
use crate::domain::CellState;

use super::init::create_chunks;
use super::WorldCore;

pub(super) fn set_cell(world: &mut WorldCore, x: u32, y: u32, state: CellState) -> EngineResult<CellState> {
    let prev = world.grid.set(x, y, state)?;
    touch(world, x, y);
    Ok(prev)
}

pub(super) fn paint_circle(world: &mut WorldCore, cx: i32, cy: i32, radius: i32, state: CellState) -> usize {
    if radius < 0 {
        return 0;
    }
    let r = i64::from(radius);
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    // Clip the bounding square to the world before scanning it.
    let x0 = (cx - r).max(0);
    let y0 = (cy - r).max(0);
    let x1 = (cx + r + 1).min(i64::from(world.width()));
    let y1 = (cy + r + 1).min(i64::from(world.height()));

    let mut written = 0;
    for py in y0..y1 {
        for px in x0..x1 {
            let (dx, dy) = (px - cx, py - cy);
            if dx * dx + dy * dy > r * r {
                continue;
            }
            if write_in_world(world, px as i32, py as i32, state) {
                written += 1;
            }
        }
    }
    written
}

pub(super) fn fill_rect(world: &mut WorldCore, x: i32, y: i32, w: u32, h: u32, state: CellState) -> usize {
    // Clip to the world first so huge rectangles stay cheap.
    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + i64::from(w)).min(i64::from(world.width()));
    let y1 = (i64::from(y) + i64::from(h)).min(i64::from(world.height()));

    let mut written = 0;
    for py in y0..y1 {
        for px in x0..x1 {
            if write_in_world(world, px as i32, py as i32, state) {
                written += 1;
            }
        }
    }
    written
}

pub(super) fn clear(world: &mut WorldCore) {
    world.grid.fill(CellState::Empty);
    world.chunks = create_chunks(&world.layout, world.config.rng_salt);
    log::info!("world cleared ({} chunks reset)", world.chunks.len());
}

#[inline]
fn write_in_world(world: &mut WorldCore, x: i32, y: i32, state: CellState) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    set_cell(world, x as u32, y as u32, state).is_ok()
}

/// Mark the owning chunk dirty; optionally wake the neighbours whose halo covers `(x, y)`.
fn touch(world: &mut WorldCore, x: u32, y: u32) {
    let Some(coord) = world.layout.chunk_of_pixel(x, y) else {
        return;
    };
    let id = world.layout.chunk_id(coord);
    if let Some(chunk) = world.chunks.get_mut(id) {
        chunk.mark_dirty();
    }

    if world.config.wake_adjacent_chunks {
        let chunks = &mut world.chunks;
        world.layout.for_each_adjacent_chunk(x, y, |neighbor| {
            if let Some(chunk) = chunks.get_mut(neighbor) {
                chunk.wake();
            }
        });
    }
}
