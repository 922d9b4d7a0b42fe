//! Benchmark: tick cost for common world states.
//!
//! Falling benchmarks rebuild the world before every iteration so the
//! measurement covers active chunks, not a settled world.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use sandgrid_engine::{CellState, WorldCore};

const CHUNKS: u32 = 16;
const CHUNK_SIZE: u32 = 32;
const SIDE: u32 = CHUNKS * CHUNK_SIZE;

fn new_world() -> WorldCore {
    WorldCore::with_dimensions(CHUNKS, CHUNKS, CHUNK_SIZE).expect("valid bench world")
}

/// Settled world: every chunk asleep, measures scheduler overhead only.
fn bench_tick_sleeping(c: &mut Criterion) {
    c.bench_function("tick_sleeping_512x512", |b| {
        let mut world = new_world();
        world.step();
        world.step();
        b.iter(|| black_box(world.step()));
    });
}

fn bench_tick_sand_falling(c: &mut Criterion) {
    c.bench_function("tick_sand_falling_512x512", |b| {
        b.iter_batched(
            || {
                let mut world = new_world();
                world.fill_rect(0, 0, SIDE, SIDE / 5, CellState::Sand);
                world
            },
            |mut world| black_box(world.step()),
            BatchSize::LargeInput,
        );
    });
}

fn bench_tick_water_body(c: &mut Criterion) {
    c.bench_function("tick_water_body_512x512", |b| {
        b.iter_batched(
            || {
                let mut world = new_world();
                world.fill_rect(0, (SIDE / 2) as i32, SIDE, SIDE / 2, CellState::Water);
                world.fill_rect(0, 0, SIDE / 4, SIDE / 4, CellState::Water);
                world
            },
            |mut world| black_box(world.step()),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_tick_sleeping, bench_tick_sand_falling, bench_tick_water_body);
criterion_main!(benches);
