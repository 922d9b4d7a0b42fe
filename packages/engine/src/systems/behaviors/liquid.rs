//! LiquidBehavior - Water
//!
//! Falls straight down, otherwise spreads one cell sideways. Water never
//! moves diagonally.

use super::{lateral_dir, try_move, Behavior, Neighborhood};
use crate::domain::{CellState, RuleOptions};

pub struct LiquidBehavior {
    rules: RuleOptions,
}

impl LiquidBehavior {
    pub fn new(rules: RuleOptions) -> Self {
        Self { rules }
    }
}

impl Behavior for LiquidBehavior {
    fn update<N: Neighborhood>(&self, cell: CellState, hood: &mut N, rng: &mut u32) -> bool {
        if try_move(hood, cell, self.rules, 0, 1) {
            return true;
        }

        let dir = lateral_dir(rng);
        try_move(hood, cell, self.rules, dir, 0) || try_move(hood, cell, self.rules, -dir, 0)
    }
}
