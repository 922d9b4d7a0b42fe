//! Cell states.
//!
//! A cell has no identity beyond its grid position; the whole state is one byte.

use crate::common::EngineError;

use super::config::RuleOptions;

pub const CELL_EMPTY: u8 = 0;
pub const CELL_SOLID: u8 = 1;
pub const CELL_SAND: u8 = 2;
pub const CELL_WATER: u8 = 3;

/// Number of distinct cell states (length of per-state count arrays).
pub const CELL_STATE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Empty = CELL_EMPTY,
    Solid = CELL_SOLID,
    Sand = CELL_SAND,
    Water = CELL_WATER,
}

impl CellState {
    pub const ALL: [CellState; CELL_STATE_COUNT] =
        [CellState::Empty, CellState::Solid, CellState::Sand, CellState::Water];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Sand and Water are the only states that ever act as a move source.
    #[inline]
    pub fn is_mobile(self) -> bool {
        matches!(self, CellState::Sand | CellState::Water)
    }

    /// Whether a cell in this state may swap into `target`.
    ///
    /// Empty is always enterable. Sand sinking into Water is the optional
    /// density displacement and only applies when the rule option is on.
    #[inline]
    pub fn can_displace(self, target: CellState, rules: RuleOptions) -> bool {
        match (self, target) {
            (_, CellState::Empty) => true,
            (CellState::Sand, CellState::Water) => rules.sand_displaces_water,
            _ => false,
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            CELL_EMPTY => Ok(CellState::Empty),
            CELL_SOLID => Ok(CellState::Solid),
            CELL_SAND => Ok(CellState::Sand),
            CELL_WATER => Ok(CellState::Water),
            other => Err(EngineError::InvalidCellState(other)),
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state.id()
    }
}
