use super::*;

impl Chunk {
    // === External edits ===

    /// An edit touched this chunk: redraw it and simulate it next tick.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.render_dirty = true;
        self.physics_awake = true;
        self.edit_pending = true;
    }

    /// Schedule for physics without touching render state (neighbour activity).
    #[inline]
    pub fn wake(&mut self) {
        self.physics_awake = true;
    }

    /// Redraw without re-simulating (presentation settings changed).
    #[inline]
    pub fn mark_render_dirty(&mut self) {
        self.render_dirty = true;
    }

    // === End of tick ===

    /// Called once per chunk after the last phase of a tick.
    ///
    /// Sleeps only after two consecutive quiet ticks with no pending edit.
    pub fn update_activity(&mut self, changed_this_tick: bool) {
        let edited = std::mem::take(&mut self.edit_pending);

        self.physics_awake = changed_this_tick || self.changed_last_tick || edited;
        if changed_this_tick || edited {
            self.render_dirty = true;
        }
        self.changed_last_tick = changed_this_tick;
    }

    // === Render consumer ===

    /// Clear the render flag after the consumer uploaded the chunk.
    /// Returns whether it was set.
    #[inline]
    pub fn consume_render_dirty(&mut self) -> bool {
        std::mem::take(&mut self.render_dirty)
    }
}
