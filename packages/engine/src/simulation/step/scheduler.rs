//! Phase Scheduler
//!
//! One tick walks an explicit state machine:
//!
//! ```text
//! Idle -> Clearing -> Running(0) -> Joining(0) -> Running(1) -> ... -> Joining(8) -> Settled -> Idle
//! ```
//!
//! Chunks in one phase are at least three chunk widths apart on some axis
//! and a rule reaches at most one cell past its chunk, so tasks of one
//! phase never touch the same cell. That spacing is what lets the phase run
//! on the shared grid without locks. The end of the parallel iterator is
//! the barrier: every write of phase k is visible before phase k+1 starts.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::spatial::chunks::{ChangeTracker, Chunk, ChunkLayout, PhaseKey, HALO, PHASE_COUNT};
use crate::spatial::grid::CellGrid;
use crate::systems::behaviors::BehaviorRegistry;

use super::chunk_processing::process_chunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    Idle,
    Clearing,
    Running(usize),
    Joining(usize),
    Settled,
}

impl SchedulerState {
    /// Legal successor states; anything else is a scheduler bug.
    pub fn can_transition_to(self, next: SchedulerState) -> bool {
        use SchedulerState::*;
        match (self, next) {
            (Idle, Clearing) => true,
            (Clearing, Running(0)) => true,
            (Running(k), Joining(j)) => k == j,
            (Joining(k), Running(j)) => j == k + 1 && j < PHASE_COUNT,
            (Joining(k), Settled) => k + 1 == PHASE_COUNT,
            (Settled, Idle) => true,
            _ => false,
        }
    }
}

/// Work done by one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub processed: usize,
    pub skipped: usize,
    pub moved: usize,
}

impl PhaseOutcome {
    #[inline]
    fn merge(self, other: PhaseOutcome) -> PhaseOutcome {
        PhaseOutcome {
            processed: self.processed + other.processed,
            skipped: self.skipped + other.skipped,
            moved: self.moved + other.moved,
        }
    }
}

/// Owns the change tracker and drives the per-tick state machine.
pub struct PhaseScheduler {
    tracker: ChangeTracker,
    state: SchedulerState,
}

impl PhaseScheduler {
    pub fn new(cell_count: usize) -> Self {
        Self {
            tracker: ChangeTracker::new(cell_count),
            state: SchedulerState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> SchedulerState { self.state }

    #[inline]
    pub fn tracker(&self) -> &ChangeTracker { &self.tracker }

    fn transition(&mut self, next: SchedulerState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal scheduler transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    /// Idle -> Clearing: wipe the previous tick's writes.
    pub(crate) fn begin_tick(&mut self) {
        self.transition(SchedulerState::Clearing);
        self.tracker.clear();
    }

    /// Running(k) -> Joining(k): process every awake chunk of phase `key`.
    pub(crate) fn run_phase(
        &mut self,
        key: PhaseKey,
        chunks: &mut [Chunk],
        grid: &mut CellGrid,
        layout: &ChunkLayout,
        behaviors: &BehaviorRegistry,
    ) -> PhaseOutcome {
        let k = key.index();
        self.transition(SchedulerState::Running(k));

        let cells = grid.shared();
        let tracker = &self.tracker;
        let run = |chunk: &mut Chunk| {
            if !chunk.is_physics_awake() {
                return PhaseOutcome { skipped: 1, ..PhaseOutcome::default() };
            }
            PhaseOutcome {
                processed: 1,
                moved: process_chunk(chunk, layout, &cells, tracker, behaviors),
                ..PhaseOutcome::default()
            }
        };

        #[cfg(feature = "parallel")]
        let outcome = chunks
            .par_iter_mut()
            .filter(|c| c.phase() == key)
            .map(run)
            .reduce(PhaseOutcome::default, PhaseOutcome::merge);

        #[cfg(not(feature = "parallel"))]
        let outcome = chunks
            .iter_mut()
            .filter(|c| c.phase() == key)
            .map(run)
            .fold(PhaseOutcome::default(), PhaseOutcome::merge);

        log::trace!(
            "phase {} processed={} skipped={} moved={}",
            k,
            outcome.processed,
            outcome.skipped,
            outcome.moved
        );

        self.transition(SchedulerState::Joining(k));
        outcome
    }

    /// Joining(8) -> Settled: recompute every chunk's activity from the tracker.
    ///
    /// With `wake_adjacent`, a chunk whose one-cell halo saw a write stays
    /// scheduled even if its own cells did not change.
    pub(crate) fn settle(&mut self, chunks: &mut [Chunk], layout: &ChunkLayout, wake_adjacent: bool) {
        self.transition(SchedulerState::Settled);

        let (width, height) = (layout.width(), layout.height());
        for chunk in chunks.iter_mut() {
            let rect = layout.pixel_rect(chunk.coord());
            let changed = self.tracker.any_in_rect(rect, width);
            chunk.update_activity(changed);

            if wake_adjacent && !changed {
                let halo = rect.grown(HALO as u32, width, height);
                if self.tracker.any_in_rect(halo, width) {
                    chunk.wake();
                }
            }
        }
    }

    /// Settled -> Idle
    pub(crate) fn finish(&mut self) {
        self.transition(SchedulerState::Idle);
    }
}
