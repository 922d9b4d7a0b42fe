//! PowderBehavior - Sand
//!
//! Falls straight down, otherwise slides down one diagonal. The diagonal
//! tried first is picked per cell from the chunk's generator.

use super::{lateral_dir, try_move, Behavior, Neighborhood};
use crate::domain::{CellState, RuleOptions};

pub struct PowderBehavior {
    rules: RuleOptions,
}

impl PowderBehavior {
    pub fn new(rules: RuleOptions) -> Self {
        Self { rules }
    }
}

impl Behavior for PowderBehavior {
    fn update<N: Neighborhood>(&self, cell: CellState, hood: &mut N, rng: &mut u32) -> bool {
        if try_move(hood, cell, self.rules, 0, 1) {
            return true;
        }

        let dir = lateral_dir(rng);
        try_move(hood, cell, self.rules, dir, 1) || try_move(hood, cell, self.rules, -dir, 1)
    }
}
