use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(
        "Invalid configuration: {rows}x{columns} board with {bombs} bombs, \
         needs at least one row, one column, one bomb and one safe cell"
    )]
    InvalidConfiguration {
        rows: Coord,
        columns: Coord,
        bombs: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not fit the coordinate range")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
