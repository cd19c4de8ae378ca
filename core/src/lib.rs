#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Validated board dimensions and bomb count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    rows: Coord,
    columns: Coord,
    bombs: CellCount,
}

impl BoardConfig {
    pub(crate) const fn new_unchecked(rows: Coord, columns: Coord, bombs: CellCount) -> Self {
        Self {
            rows,
            columns,
            bombs,
        }
    }

    /// Requires at least one row, one column, one bomb and one safe cell.
    pub fn new(rows: Coord, columns: Coord, bombs: CellCount) -> Result<Self> {
        if rows == 0 || columns == 0 || bombs == 0 || bombs >= mult(rows, columns) {
            return Err(GameError::InvalidConfiguration {
                rows,
                columns,
                bombs,
            });
        }
        Ok(Self::new_unchecked(rows, columns, bombs))
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn columns(&self) -> Coord {
        self.columns
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn bombs(&self) -> CellCount {
        self.bombs
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.bombs
    }
}

pub const CUSTOM_ROWS: core::ops::RangeInclusive<Coord> = 5..=18;
pub const CUSTOM_COLUMNS: core::ops::RangeInclusive<Coord> = 5..=30;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Custom(BoardConfig),
}

impl Difficulty {
    /// Custom board, clamped to the ranges a player can pick from.
    pub fn custom(rows: Coord, columns: Coord, bombs: CellCount) -> Self {
        let rows = rows.clamp(*CUSTOM_ROWS.start(), *CUSTOM_ROWS.end());
        let columns = columns.clamp(*CUSTOM_COLUMNS.start(), *CUSTOM_COLUMNS.end());
        let bombs = bombs.clamp(1, mult(rows, columns) - 1);
        Self::Custom(BoardConfig::new_unchecked(rows, columns, bombs))
    }

    pub const fn config(&self) -> BoardConfig {
        match self {
            Self::Beginner => BoardConfig::new_unchecked(5, 5, 5),
            Self::Intermediate => BoardConfig::new_unchecked(8, 8, 15),
            Self::Expert => BoardConfig::new_unchecked(10, 10, 30),
            Self::Custom(config) => *config,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

/// Why a command left the board untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    Flagged,
    OutOfBounds,
    Revealed,
    /// Every bomb already has a flag.
    NoFlagsLeft,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Safe reveal, with the number of tiles that flipped.
    Continue(CellCount),
    /// The last safe tiles flipped.
    Win(CellCount),
    Loss { row: Coord, col: Coord },
    AlreadyRevealed,
    Blocked(BlockReason),
}

impl RevealOutcome {
    pub const fn tiles_revealed(self) -> CellCount {
        match self {
            Self::Continue(count) | Self::Win(count) => count,
            _ => 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    Blocked(BlockReason),
}

impl FlagOutcome {
    /// Change of the remaining-bomb counter shown to the player.
    pub const fn counter_delta(self) -> i8 {
        match self {
            Self::Flagged => -1,
            Self::Unflagged => 1,
            Self::Blocked(_) => 0,
        }
    }
}
