use core::fmt;
use serde::{Deserialize, Serialize};

/// Ground truth of a single cell, fixed when the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Mine,
    /// Number of mines among the up-to-8 neighbours.
    Count(u8),
}

impl Token {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }

    pub const fn adjacent_count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Count(count) => Some(count),
        }
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Unrevealed,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Unrevealed
    }
}

/// What a display layer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Blank,
    Flag,
    Mine,
    Count(u8),
}

impl CellView {
    pub const fn new(state: CellState, token: Token) -> Self {
        match (state, token) {
            (CellState::Unrevealed, _) => Self::Blank,
            (CellState::Flagged, _) => Self::Flag,
            (CellState::Revealed, Token::Mine) => Self::Mine,
            (CellState::Revealed, Token::Count(count)) => Self::Count(count),
        }
    }
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str(" "),
            Self::Flag => f.write_str("🚩"),
            Self::Mine => f.write_str("💣"),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}
