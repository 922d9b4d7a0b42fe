use crate::common::EngineResult;
use crate::domain::WorldConfig;
use crate::spatial::chunks::{Chunk, ChunkLayout};
use crate::spatial::grid::CellGrid;
use crate::systems::behaviors::BehaviorRegistry;

use super::perf_stats::PerfStats;
use super::random::chunk_seed;
use super::scheduler::PhaseScheduler;
use super::step::TickSummary;
use super::WorldCore;

/// Below this size a phase holds few chunks relative to the world and the
/// tick is close to sequential.
const MIN_PARALLEL_CHUNK_SIZE: u32 = 4;

pub(super) fn create_world_core(config: WorldConfig) -> EngineResult<WorldCore> {
    let layout = config.layout()?;

    if layout.chunk_size() < MIN_PARALLEL_CHUNK_SIZE {
        log::warn!(
            "chunk size {} is below {}; phases will expose little parallelism",
            layout.chunk_size(),
            MIN_PARALLEL_CHUNK_SIZE
        );
    }

    let chunks = create_chunks(&layout, config.rng_salt);

    log::info!(
        "world created: {}x{} cells, {}x{} chunks of {}px",
        layout.width(),
        layout.height(),
        layout.chunks_wide(),
        layout.chunks_tall(),
        layout.chunk_size()
    );

    Ok(WorldCore {
        grid: CellGrid::new(layout.width(), layout.height()),
        scheduler: PhaseScheduler::new(layout.cell_count()),
        behaviors: BehaviorRegistry::new(config.rules),
        chunks,
        layout,
        config,
        tick: 0,
        last_summary: TickSummary::default(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}

/// One chunk per tile in id order, each seeded from `(id, salt)`.
pub(super) fn create_chunks(layout: &ChunkLayout, salt: u64) -> Vec<Chunk> {
    (0..layout.chunk_count())
        .map(|id| Chunk::new(layout, layout.chunk_coord(id), chunk_seed(id, salt)))
        .collect()
}
