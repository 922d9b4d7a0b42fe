use wasm_bindgen::prelude::*;

use crate::domain::{CellState, WorldConfig};

use super::perf_stats::PerfStats;
use super::WorldCore;

/// Browser-facing world. Errors cross the boundary as strings.
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
    chunk_transfer_buffer: Vec<u8>,
}

impl World {
    fn from_core(core: WorldCore) -> Self {
        let size = core.layout().chunk_size() as usize;
        Self {
            core,
            chunk_transfer_buffer: Vec::with_capacity(size * size * super::RGBA_BYTES_PER_CELL),
        }
    }

    /// Native access to the simulation behind the facade
    pub fn core(&self) -> &WorldCore {
        &self.core
    }
}

#[wasm_bindgen]
impl World {
    /// Create a new world of `chunks_wide x chunks_tall` chunks of `chunk_size` pixels
    #[wasm_bindgen(constructor)]
    pub fn new(chunks_wide: u32, chunks_tall: u32, chunk_size: u32) -> Result<World, String> {
        WorldCore::with_dimensions(chunks_wide, chunks_tall, chunk_size)
            .map(Self::from_core)
            .map_err(|e| e.to_string())
    }

    /// Create a world from a camelCase JSON `WorldConfig`
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<World, String> {
        let config = WorldConfig::from_json(json).map_err(|e| e.to_string())?;
        WorldCore::new(config)
            .map(Self::from_core)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn chunk_size(&self) -> u32 { self.core.layout().chunk_size() }

    #[wasm_bindgen(getter)]
    pub fn chunks_x(&self) -> u32 { self.core.layout().chunks_wide() }

    #[wasm_bindgen(getter)]
    pub fn chunks_y(&self) -> u32 { self.core.layout().chunks_tall() }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.core.tick_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_sand_displaces_water(&mut self, enabled: bool) {
        self.core.set_sand_displaces_water(enabled);
    }

    pub fn set_wake_adjacent_chunks(&mut self, enabled: bool) {
        self.core.set_wake_adjacent_chunks(enabled);
    }

    pub fn set_tint_sleeping_chunks(&mut self, enabled: bool) {
        self.core.set_tint_sleeping_chunks(enabled);
    }

    /// Paint one cell. False for an unknown state id or a position outside the world.
    pub fn set_cell(&mut self, x: u32, y: u32, state: u8) -> bool {
        let Ok(state) = CellState::try_from(state) else {
            return false;
        };
        self.core.set_cell(x, y, state).is_ok()
    }

    /// State id at a position, `undefined` outside the world
    pub fn get_cell(&self, x: u32, y: u32) -> Option<u8> {
        self.core.get_cell(x, y).ok().map(CellState::id)
    }

    /// Brush. Returns the number of cells written.
    pub fn paint_circle(&mut self, cx: i32, cy: i32, radius: i32, state: u8) -> u32 {
        match CellState::try_from(state) {
            Ok(state) => self.core.paint_circle(cx, cy, radius, state) as u32,
            Err(_) => 0,
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, state: u8) -> u32 {
        match CellState::try_from(state) {
            Ok(state) => self.core.fill_rect(x, y, w, h, state) as u32,
            Err(_) => 0,
        }
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Step the simulation forward. Returns the number of cells moved.
    pub fn step(&mut self) -> u32 {
        self.core.step().cells_moved as u32
    }

    /// Population per state id
    pub fn cell_counts(&self) -> Vec<u32> {
        self.core.cell_counts().iter().map(|&n| n as u32).collect()
    }

    pub fn awake_chunks(&self) -> usize {
        self.core.awake_chunk_count()
    }

    pub fn total_chunks(&self) -> usize {
        self.core.chunks().len()
    }

    // === Rendering ===

    /// Ids of chunks to redraw this frame
    pub fn dirty_chunk_ids(&self) -> Vec<u32> {
        self.core.dirty_chunk_ids().into_iter().map(|id| id as u32).collect()
    }

    /// Fill the transfer buffer with a chunk's RGBA pixels and return its pointer
    pub fn extract_chunk_pixels(&mut self, chunk_id: u32) -> Result<*const u8, String> {
        self.core
            .extract_chunk_rgba(chunk_id as usize, &mut self.chunk_transfer_buffer)
            .map_err(|e| e.to_string())?;
        Ok(self.chunk_transfer_buffer.as_ptr())
    }

    /// Byte length of the last extracted chunk
    pub fn chunk_buffer_byte_size(&self) -> usize {
        self.chunk_transfer_buffer.len()
    }

    /// Clear the chunk's render flag after upload
    pub fn consume_render_dirty(&mut self, chunk_id: u32) -> bool {
        self.core.consume_render_dirty(chunk_id as usize).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_surface_as_messages() {
        let err = World::new(0, 2, 8).err().unwrap();
        assert!(err.contains("chunksWide"), "{err}");
        assert!(World::from_config_json("{").is_err());
    }

    #[test]
    fn paint_and_step_through_the_facade() {
        let mut world = World::new(2, 2, 4).unwrap();
        assert!(world.set_cell(1, 0, CellState::Sand.id()));
        assert!(!world.set_cell(1, 0, 200));
        assert!(!world.set_cell(8, 0, CellState::Sand.id()));
        assert_eq!(world.get_cell(1, 0), Some(CellState::Sand.id()));
        assert_eq!(world.get_cell(99, 0), None);

        assert_eq!(world.step(), 1);
        assert_eq!(world.get_cell(1, 1), Some(CellState::Sand.id()));
        assert_eq!(world.tick(), 1);
        assert_eq!(world.cell_counts(), vec![63, 0, 1, 0]);
    }

    #[test]
    fn extracted_pixels_fill_one_chunk() {
        let mut world = World::new(2, 1, 4).unwrap();
        world.fill_rect(4, 0, 4, 4, CellState::Solid.id());
        let ids = world.dirty_chunk_ids();
        assert_eq!(ids, vec![0, 1]);

        assert!(world.extract_chunk_pixels(1).is_ok());
        assert_eq!(world.chunk_buffer_byte_size(), 4 * 4 * 4);
        assert!(world.extract_chunk_pixels(7).is_err());

        assert!(world.consume_render_dirty(1));
        assert!(!world.consume_render_dirty(1));
        assert!(!world.consume_render_dirty(7));
    }
}
