//! Sandgrid Engine - chunked, phase-scheduled falling-sand simulation
//!
//! The world is one flat cell buffer tiled by square chunks. Each tick runs
//! nine phases; the chunks of a phase are far enough apart to be updated in
//! parallel on the shared buffer without locks.
//!
//! Architecture:
//! - common/     - Index guards and the error type
//! - domain/     - Cell states and world configuration
//! - spatial/    - Cell grid, chunks, phases, change tracker
//! - systems/    - Per-cell transition rules
//! - simulation/ - World orchestration, tick scheduler and browser facade

// Index guard macros (must be first for macro export!)
#[macro_use]
pub mod common;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

pub use common::{EngineError, EngineResult};
pub use domain::{CellState, RenderOptions, RuleOptions, WorldConfig};
pub use simulation::{PerfStats, SchedulerState, TickSummary, World, WorldCore};
pub use spatial::chunks::{Chunk, ChunkCoord, ChunkLayout, PhaseKey};

use wasm_bindgen::prelude::*;

// Thread pool initialization for the browser build
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("sandgrid engine {} initialized", version()).into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Export cell state ids for JS
#[wasm_bindgen]
pub fn cell_empty() -> u8 { domain::cells::CELL_EMPTY }
#[wasm_bindgen]
pub fn cell_solid() -> u8 { domain::cells::CELL_SOLID }
#[wasm_bindgen]
pub fn cell_sand() -> u8 { domain::cells::CELL_SAND }
#[wasm_bindgen]
pub fn cell_water() -> u8 { domain::cells::CELL_WATER }
