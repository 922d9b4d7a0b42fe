use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_sand_displaces_water(world: &mut WorldCore, enabled: bool) {
    world.config.rules.sand_displaces_water = enabled;
    world.behaviors.set_rules(world.config.rules);
    // Resting sand on water must be re-evaluated under the new rule.
    for chunk in &mut world.chunks {
        chunk.wake();
    }
}

pub(super) fn set_wake_adjacent_chunks(world: &mut WorldCore, enabled: bool) {
    world.config.wake_adjacent_chunks = enabled;
}

pub(super) fn set_tint_sleeping_chunks(world: &mut WorldCore, enabled: bool) {
    world.config.render.tint_sleeping_chunks = enabled;
    for chunk in &mut world.chunks {
        chunk.mark_render_dirty();
    }
}
