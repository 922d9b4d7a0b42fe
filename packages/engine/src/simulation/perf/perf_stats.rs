use wasm_bindgen::prelude::*;

/// Snapshot of the last tick. All zeros unless perf metrics are enabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) clear_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) settle_ms: f64,
    pub(super) chunks_processed: u32,
    pub(super) chunks_skipped: u32,
    pub(super) cells_moved: u32,
    pub(super) awake_chunks: u32,
    pub(super) dirty_chunks: u32,
    pub(super) busiest_phase_chunks: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn clear_ms(&self) -> f64 { self.clear_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn settle_ms(&self) -> f64 { self.settle_ms }
    #[wasm_bindgen(getter)]
    pub fn chunks_processed(&self) -> u32 { self.chunks_processed }
    #[wasm_bindgen(getter)]
    pub fn chunks_skipped(&self) -> u32 { self.chunks_skipped }
    #[wasm_bindgen(getter)]
    pub fn cells_moved(&self) -> u32 { self.cells_moved }
    #[wasm_bindgen(getter)]
    pub fn awake_chunks(&self) -> u32 { self.awake_chunks }
    #[wasm_bindgen(getter)]
    pub fn dirty_chunks(&self) -> u32 { self.dirty_chunks }
    /// Most chunks processed by a single phase (upper bound on useful threads)
    #[wasm_bindgen(getter)]
    pub fn busiest_phase_chunks(&self) -> u32 { self.busiest_phase_chunks }
}
