use sandgrid_engine::{CellState, World, WorldCore};

#[test]
fn perf_smoke_step() {
    let mut world = World::new(8, 4, 16).unwrap();
    world.enable_perf_metrics(true);
    world.fill_rect(0, 0, 128, 32, CellState::Sand.id());
    world.step();
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.physics_ms() >= 0.0);
    assert_eq!(stats.chunks_processed(), 32);
    assert!(stats.cells_moved() > 0);
}

#[test]
fn perf_smoke_settled_world_skips_every_chunk() {
    let mut world = WorldCore::with_dimensions(16, 16, 16).unwrap();
    world.fill_rect(0, 240, 256, 16, CellState::Solid);
    world.step();
    world.step();

    world.enable_perf_metrics(true);
    let summary = world.step();
    assert_eq!(summary.chunks_processed, 0);
    assert_eq!(summary.chunks_skipped, 256);
    assert_eq!(world.get_perf_stats().awake_chunks(), 0);
}
