use super::{ChunkCoord, ChunkLayout, PhaseKey};

/// One tile of the world: identity, activity flags and its tie-break generator.
///
/// Chunks are created once with the world and never resized or destroyed.
#[derive(Debug, Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    id: usize,
    origin_x: u32,
    origin_y: u32,
    pub(super) render_dirty: bool,
    pub(super) physics_awake: bool,
    pub(super) changed_last_tick: bool,
    pub(super) edit_pending: bool,
    rng_state: u32,
}

impl Chunk {
    /// New chunk, awake and render-dirty so its first frame is simulated and drawn.
    pub fn new(layout: &ChunkLayout, coord: ChunkCoord, rng_seed: u32) -> Self {
        debug_assert!(layout.contains_chunk(coord));
        let (origin_x, origin_y) = layout.origin(coord);
        let mut chunk = Self {
            coord,
            id: layout.chunk_id(coord),
            origin_x,
            origin_y,
            render_dirty: false,
            physics_awake: false,
            changed_last_tick: false,
            edit_pending: false,
            // xorshift32 sticks at zero
            rng_state: if rng_seed == 0 { 0x9E37_79B9 } else { rng_seed },
        };
        chunk.mark_dirty();
        chunk
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord { self.coord }

    #[inline]
    pub fn id(&self) -> usize { self.id }

    /// Pixel offset of the chunk's top-left cell.
    #[inline]
    pub fn origin(&self) -> (u32, u32) { (self.origin_x, self.origin_y) }

    #[inline]
    pub fn phase(&self) -> PhaseKey {
        PhaseKey::of(self.coord)
    }

    #[inline]
    pub fn is_render_dirty(&self) -> bool { self.render_dirty }

    #[inline]
    pub fn is_physics_awake(&self) -> bool { self.physics_awake }

    #[inline]
    pub fn has_pending_edit(&self) -> bool { self.edit_pending }

    /// Tie-break generator state, advanced by the transition rules.
    #[inline]
    pub(crate) fn rng_mut(&mut self) -> &mut u32 {
        &mut self.rng_state
    }
}
