//! Chunk-local to global addressing.
//!
//! Transition rules work in chunk-local coordinates and may step one cell
//! past any edge of their chunk. Everything that turns such a coordinate into
//! a buffer index goes through [`ChunkLayout::translate_across_boundary`].

use super::*;

/// How far (in cells) a rule may reach past its own chunk's edge.
///
/// Same-phase chunks are at least two chunk widths apart, so their halos
/// never meet. Raising this breaks the lock-free phase argument.
pub const HALO: i32 = 1;

impl ChunkLayout {
    /// Global index of chunk-local `(local_x, local_y)` of `chunk`.
    ///
    /// Locals in `-HALO..chunk_size + HALO` may land in a neighbouring chunk.
    /// Returns `None` when the target is outside the world or outside the halo.
    pub fn translate_across_boundary(
        &self,
        chunk: ChunkCoord,
        local_x: i32,
        local_y: i32,
    ) -> Option<usize> {
        if !self.contains_chunk(chunk) {
            return None;
        }

        let size = i64::from(self.chunk_size);
        let halo = i64::from(HALO);
        let (lx, ly) = (i64::from(local_x), i64::from(local_y));
        if lx < -halo || ly < -halo || lx >= size + halo || ly >= size + halo {
            return None;
        }

        let gx = i64::from(chunk.x) * size + lx;
        let gy = i64::from(chunk.y) * size + ly;
        if gx < 0 || gy < 0 || gx >= i64::from(self.width) || gy >= i64::from(self.height) {
            return None;
        }

        Some(gy as usize * self.width as usize + gx as usize)
    }
}
