//! Domain types: what a cell can be and how a world is configured.

pub mod cells;
pub mod config;

pub use cells::{CellState, CELL_STATE_COUNT};
pub use config::{RenderOptions, RuleOptions, WorldConfig, DEFAULT_RNG_SALT};
