//! Behaviors - per-cell transition rules
//!
//! Each mobile cell state has one behavior. A behavior only sees the world
//! through a [`Neighborhood`], which resolves offsets relative to the cell
//! being updated, refuses targets outside the world or past the chunk halo,
//! and records every write in the change tracker.

mod liquid;
mod powder;

pub use liquid::LiquidBehavior;
pub use powder::PowderBehavior;

use crate::domain::{CellState, RuleOptions};

/// Reader/writer seam between a rule and the shared grid.
///
/// Offsets are relative to the cell being updated and never exceed one cell
/// in either axis.
pub trait Neighborhood {
    /// State at the offset, or `None` when the target is outside the world
    /// or outside the one-cell halo of the current chunk.
    fn peek(&self, dx: i32, dy: i32) -> Option<CellState>;

    /// Whether the target was already written this tick. Unreachable
    /// targets report `true`.
    fn written(&self, dx: i32, dy: i32) -> bool;

    /// Swap the current cell with the target and mark both as written.
    fn swap_with(&mut self, dx: i32, dy: i32) -> bool;
}

/// Behavior trait - each mobile cell state implements this
pub trait Behavior {
    /// Attempt one transition. Returns whether the cell moved.
    fn update<N: Neighborhood>(&self, cell: CellState, hood: &mut N, rng: &mut u32) -> bool;
}

/// Single candidate move: blocked when unreachable, already written this
/// tick, or occupied by something `cell` cannot enter.
#[inline]
pub fn try_move<N: Neighborhood>(
    hood: &mut N,
    cell: CellState,
    rules: RuleOptions,
    dx: i32,
    dy: i32,
) -> bool {
    match hood.peek(dx, dy) {
        Some(target) if cell.can_displace(target, rules) && !hood.written(dx, dy) => {
            hood.swap_with(dx, dy)
        }
        _ => false,
    }
}

/// Xorshift32 random number generator
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Preferred lateral direction for this cell and tick: -1 (left) or 1 (right).
#[inline]
pub fn lateral_dir(rng: &mut u32) -> i32 {
    // Low bits of xorshift32 are the weakest, take one from the middle.
    if (xorshift32(rng) >> 16) & 1 == 0 { -1 } else { 1 }
}

/// Behavior registry - dispatch by cell state
pub struct BehaviorRegistry {
    powder: PowderBehavior,
    liquid: LiquidBehavior,
}

impl BehaviorRegistry {
    pub fn new(rules: RuleOptions) -> Self {
        Self {
            powder: PowderBehavior::new(rules),
            liquid: LiquidBehavior::new(rules),
        }
    }

    pub fn set_rules(&mut self, rules: RuleOptions) {
        *self = Self::new(rules);
    }

    /// Dispatch update to the behavior of `cell`
    #[inline]
    pub fn update<N: Neighborhood>(&self, cell: CellState, hood: &mut N, rng: &mut u32) -> bool {
        match cell {
            CellState::Sand => self.powder.update(cell, hood, rng),
            CellState::Water => self.liquid.update(cell, hood, rng),
            _ => false, // Solid and Empty never move
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new(RuleOptions::default())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory neighborhood over a small standalone grid.

    use super::Neighborhood;
    use crate::domain::CellState;

    pub struct MockHood {
        pub width: i32,
        pub height: i32,
        pub cells: Vec<CellState>,
        pub written: Vec<bool>,
        pub x: i32,
        pub y: i32,
    }

    impl MockHood {
        pub fn new(width: i32, height: i32) -> Self {
            let size = (width * height) as usize;
            Self {
                width,
                height,
                cells: vec![CellState::Empty; size],
                written: vec![false; size],
                x: 0,
                y: 0,
            }
        }

        pub fn with(mut self, x: i32, y: i32, state: CellState) -> Self {
            let idx = self.idx(x, y).unwrap();
            self.cells[idx] = state;
            self
        }

        pub fn at(mut self, x: i32, y: i32) -> Self {
            self.x = x;
            self.y = y;
            self
        }

        pub fn get(&self, x: i32, y: i32) -> CellState {
            self.cells[self.idx(x, y).unwrap()]
        }

        fn idx(&self, x: i32, y: i32) -> Option<usize> {
            if x < 0 || y < 0 || x >= self.width || y >= self.height {
                return None;
            }
            Some((y * self.width + x) as usize)
        }
    }

    impl Neighborhood for MockHood {
        fn peek(&self, dx: i32, dy: i32) -> Option<CellState> {
            self.idx(self.x + dx, self.y + dy).map(|i| self.cells[i])
        }

        fn written(&self, dx: i32, dy: i32) -> bool {
            self.idx(self.x + dx, self.y + dy).map_or(true, |i| self.written[i])
        }

        fn swap_with(&mut self, dx: i32, dy: i32) -> bool {
            let (Some(a), Some(b)) = (self.idx(self.x, self.y), self.idx(self.x + dx, self.y + dy)) else {
                return false;
            };
            self.cells.swap(a, b);
            self.written[a] = true;
            self.written[b] = true;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::MockHood;
    use super::*;

    #[test]
    fn lateral_dir_uses_both_directions() {
        let mut rng = 0x1234_5678;
        let dirs: Vec<i32> = (0..64).map(|_| lateral_dir(&mut rng)).collect();
        assert!(dirs.contains(&-1));
        assert!(dirs.contains(&1));
        assert!(dirs.iter().all(|d| *d == -1 || *d == 1));
    }

    #[test]
    fn try_move_refuses_written_targets() {
        let mut hood = MockHood::new(3, 3).with(1, 0, CellState::Sand).at(1, 0);
        hood.written[4] = true; // (1, 1)
        assert!(!try_move(&mut hood, CellState::Sand, RuleOptions::default(), 0, 1));
        assert_eq!(hood.get(1, 0), CellState::Sand);
    }

    #[test]
    fn registry_ignores_static_states() {
        let registry = BehaviorRegistry::default();
        let mut rng = 7;
        let mut hood = MockHood::new(3, 3).with(1, 0, CellState::Solid).at(1, 0);
        assert!(!registry.update(CellState::Solid, &mut hood, &mut rng));
        assert!(!registry.update(CellState::Empty, &mut hood, &mut rng));
        assert_eq!(rng, 7);
    }
}
