use crate::spatial::chunks::PhaseKey;

use super::{PerfTimer, WorldCore};

/// What one tick did. Returned by every step regardless of perf settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick number this summary belongs to (1 for the first step)
    pub tick: u64,
    pub chunks_processed: usize,
    pub chunks_skipped: usize,
    pub cells_moved: usize,
}

pub(super) fn step(world: &mut WorldCore) -> TickSummary {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // === Clearing ===
    let t0 = if perf_on { Some(PerfTimer::start()) } else { None };
    world.scheduler.begin_tick();
    if let Some(t) = t0 {
        world.perf_stats.clear_ms = t.elapsed_ms();
    }

    // === Running / Joining, phases in fixed order ===
    let t0 = if perf_on { Some(PerfTimer::start()) } else { None };
    let mut summary = TickSummary {
        tick: world.tick + 1,
        ..TickSummary::default()
    };
    let mut busiest_phase = 0usize;
    for key in PhaseKey::ALL {
        let outcome = world.scheduler.run_phase(
            key,
            &mut world.chunks,
            &mut world.grid,
            &world.layout,
            &world.behaviors,
        );
        summary.chunks_processed += outcome.processed;
        summary.chunks_skipped += outcome.skipped;
        summary.cells_moved += outcome.moved;
        busiest_phase = busiest_phase.max(outcome.processed);
    }
    if let Some(t) = t0 {
        world.perf_stats.physics_ms = t.elapsed_ms();
    }

    // === Settled ===
    let t0 = if perf_on { Some(PerfTimer::start()) } else { None };
    world
        .scheduler
        .settle(&mut world.chunks, &world.layout, world.config.wake_adjacent_chunks);
    if let Some(t) = t0 {
        world.perf_stats.settle_ms = t.elapsed_ms();
    }
    world.scheduler.finish();

    world.tick = summary.tick;
    world.last_summary = summary;

    if perf_on {
        let stats = &mut world.perf_stats;
        stats.chunks_processed = summary.chunks_processed as u32;
        stats.chunks_skipped = summary.chunks_skipped as u32;
        stats.cells_moved = summary.cells_moved as u32;
        stats.busiest_phase_chunks = busiest_phase as u32;
        stats.awake_chunks = world.chunks.iter().filter(|c| c.is_physics_awake()).count() as u32;
        stats.dirty_chunks = world.chunks.iter().filter(|c| c.is_render_dirty()).count() as u32;
        if let Some(start) = step_start {
            stats.step_ms = start.elapsed_ms();
        }

        log::debug!(
            "tick {}: {} chunks run, {} asleep, {} cells moved in {:.3}ms",
            summary.tick,
            summary.chunks_processed,
            summary.chunks_skipped,
            summary.cells_moved,
            stats.step_ms
        );
    }

    summary
}
