//! World - chunked, phase-scheduled cell simulation
//!
//! `WorldCore` owns the cell grid, the chunk collection and the phase
//! scheduler (which owns the change tracker). It only orchestrates; the
//! pieces live in the submodules below:
//! - `init/`     world construction and runtime settings
//! - `step/`     the tick: scheduler state machine and per-chunk processing
//! - `commands/` edits issued between ticks
//! - `render/`   pull-based RGBA extraction for dirty chunks
//! - `perf/`     timers and the exported stats snapshot

use crate::common::{EngineError, EngineResult};
use crate::domain::{CellState, WorldConfig, CELL_STATE_COUNT};
use crate::spatial::chunks::{ChangeTracker, Chunk, ChunkLayout};
use crate::spatial::grid::CellGrid;
use crate::systems::behaviors::BehaviorRegistry;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/random.rs"]
mod random;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/scheduler.rs"]
mod scheduler;
#[path = "step/chunk_processing.rs"]
mod chunk_processing;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use random::chunk_seed;
pub use render_extract::{cell_color, RGBA_BYTES_PER_CELL};
pub use scheduler::{PhaseOutcome, PhaseScheduler, SchedulerState};
pub use step::TickSummary;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    config: WorldConfig,
    layout: ChunkLayout,
    grid: CellGrid,
    chunks: Vec<Chunk>,
    scheduler: PhaseScheduler,
    behaviors: BehaviorRegistry,

    // State
    tick: u64,
    last_summary: TickSummary,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a world from a validated configuration
    pub fn new(config: WorldConfig) -> EngineResult<Self> {
        init::create_world_core(config)
    }

    /// Shorthand for `WorldConfig::new` with every other option at its default
    pub fn with_dimensions(chunks_wide: u32, chunks_tall: u32, chunk_size: u32) -> EngineResult<Self> {
        Self::new(WorldConfig::new(chunks_wide, chunks_tall, chunk_size))
    }

    pub fn config(&self) -> &WorldConfig { &self.config }

    pub fn layout(&self) -> &ChunkLayout { &self.layout }

    pub fn width(&self) -> u32 { self.layout.width() }

    pub fn height(&self) -> u32 { self.layout.height() }

    pub fn grid(&self) -> &CellGrid { &self.grid }

    pub fn tick_count(&self) -> u64 { self.tick }

    pub fn last_summary(&self) -> TickSummary { self.last_summary }

    // === Settings ===

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_sand_displaces_water(&mut self, enabled: bool) {
        settings::set_sand_displaces_water(self, enabled);
    }

    pub fn set_wake_adjacent_chunks(&mut self, enabled: bool) {
        settings::set_wake_adjacent_chunks(self, enabled);
    }

    pub fn set_tint_sleeping_chunks(&mut self, enabled: bool) {
        settings::set_tint_sleeping_chunks(self, enabled);
    }

    // === Edits (between ticks only) ===

    /// Write one cell and mark its chunk dirty. Returns the previous state.
    pub fn set_cell(&mut self, x: u32, y: u32, state: CellState) -> EngineResult<CellState> {
        commands::set_cell(self, x, y, state)
    }

    pub fn get_cell(&self, x: u32, y: u32) -> EngineResult<CellState> {
        self.grid.get(x, y)
    }

    /// Brush: every in-world cell within `radius` of `(cx, cy)`. Returns cells written.
    pub fn paint_circle(&mut self, cx: i32, cy: i32, radius: i32, state: CellState) -> usize {
        commands::paint_circle(self, cx, cy, radius, state)
    }

    /// Fill the in-world part of a `w x h` rectangle. Returns cells written.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, state: CellState) -> usize {
        commands::fill_rect(self, x, y, w, h, state)
    }

    /// Reset every cell to Empty and every chunk to awake + dirty
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === Tick ===

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> TickSummary {
        step::step(self)
    }

    // === Introspection ===

    /// Per-state population, indexed by `CellState::id()`
    pub fn cell_counts(&self) -> [usize; CELL_STATE_COUNT] {
        self.grid.counts()
    }

    pub fn chunks(&self) -> &[Chunk] { &self.chunks }

    pub fn chunk(&self, id: usize) -> EngineResult<&Chunk> {
        self.chunks.get(id).ok_or(EngineError::UnknownChunk {
            id,
            count: self.chunks.len(),
        })
    }

    /// Cells written during the most recent tick
    pub fn change_tracker(&self) -> &ChangeTracker {
        self.scheduler.tracker()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn awake_chunk_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_physics_awake()).count()
    }

    // === Rendering ===

    /// Ids of chunks whose render flag is set, ascending
    pub fn dirty_chunk_ids(&self) -> Vec<usize> {
        render_extract::dirty_chunk_ids(self)
    }

    /// Chunk pixels as tightly packed RGBA8, chunk-local row-major
    pub fn extract_chunk_rgba(&self, chunk_id: usize, out: &mut Vec<u8>) -> EngineResult<()> {
        render_extract::extract_chunk_rgba(self, chunk_id, out)
    }

    /// Clear a chunk's render flag after upload. Returns whether it was set.
    pub fn consume_render_dirty(&mut self, chunk_id: usize) -> EngineResult<bool> {
        render_extract::consume_render_dirty(self, chunk_id)
    }
}

impl std::fmt::Debug for WorldCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldCore")
            .field("layout", &self.layout)
            .field("tick", &self.tick)
            .field("awake_chunks", &self.awake_chunk_count())
            .field("state", &self.scheduler.state())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
