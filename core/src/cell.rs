use serde::{Deserialize, Serialize};

use crate::*;

/// Result of revealing a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellReveal {
    /// The cell carries a flag and stays hidden.
    Blocked,
    Bomb,
    /// Safe cell touching `1..=8` bombs.
    Number(u8),
    /// Safe cell with no bomb around it.
    Blank,
}

/// Player-visible rendering of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Open(u8),
    Mine,
    /// The bomb whose reveal lost the game.
    Exploded,
    /// A flag that turned out to cover a safe cell, shown after a loss.
    FalseFlag,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

/// State machine for one grid position.
///
/// Bomb and adjacency fields are written once per generation, flag and reveal
/// fields during play. Coordinates never change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    bomb: bool,
    flagged: bool,
    revealed: bool,
    adjacent_bombs: u8,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self {
            row,
            col,
            bomb: false,
            flagged: false,
            revealed: false,
            adjacent_bombs: 0,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn is_bomb(&self) -> bool {
        self.bomb
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Number of bombs around this cell, `None` for bombs.
    pub const fn adjacent_bomb_count(&self) -> Option<u8> {
        if self.bomb {
            None
        } else {
            Some(self.adjacent_bombs)
        }
    }

    pub const fn is_blank(&self) -> bool {
        !self.bomb && self.adjacent_bombs == 0
    }

    pub fn place_bomb(&mut self) {
        self.bomb = true;
        self.adjacent_bombs = 0;
    }

    pub fn increment_adjacent_bomb_count(&mut self) {
        if self.bomb {
            log::warn!(
                "Ignoring adjacency increment on bomb cell ({}, {})",
                self.row,
                self.col
            );
            return;
        }
        if self.adjacent_bombs >= 8 {
            log::warn!(
                "Ignoring adjacency increment past 8 on cell ({}, {})",
                self.row,
                self.col
            );
            return;
        }
        self.adjacent_bombs += 1;
    }

    /// Flips the flag. Revealed cells keep their state and `false` is returned.
    pub fn toggle_flag(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.flagged = !self.flagged;
        true
    }

    pub fn reveal(&mut self) -> CellReveal {
        if self.flagged {
            return CellReveal::Blocked;
        }
        self.revealed = true;
        self.display()
    }

    pub(crate) fn set_flag(&mut self) {
        self.flagged = true;
    }

    /// Reveals a flagged safe cell so it renders as [`CellView::FalseFlag`].
    pub(crate) fn expose_false_flag(&mut self) {
        if self.flagged && !self.bomb {
            self.revealed = true;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.row, self.col);
    }

    pub fn view(&self) -> CellView {
        match (self.flagged, self.revealed, self.bomb) {
            (true, true, false) => CellView::FalseFlag,
            (true, _, _) => CellView::Flagged,
            (false, false, _) => CellView::Hidden,
            (false, true, true) => CellView::Mine,
            (false, true, false) => CellView::Open(self.adjacent_bombs),
        }
    }

    fn display(&self) -> CellReveal {
        match self.adjacent_bomb_count() {
            None => CellReveal::Bomb,
            Some(0) => CellReveal::Blank,
            Some(count) => CellReveal::Number(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_reports_display_state() {
        let mut blank = Cell::new(0, 0);
        assert_eq!(blank.reveal(), CellReveal::Blank);
        assert!(blank.is_revealed());

        let mut number = Cell::new(0, 1);
        number.increment_adjacent_bomb_count();
        number.increment_adjacent_bomb_count();
        assert_eq!(number.reveal(), CellReveal::Number(2));
        assert_eq!(number.view(), CellView::Open(2));

        let mut bomb = Cell::new(1, 1);
        bomb.place_bomb();
        assert_eq!(bomb.reveal(), CellReveal::Bomb);
        assert_eq!(bomb.view(), CellView::Mine);
    }

    #[test]
    fn flag_blocks_reveal() {
        let mut cell = Cell::new(2, 3);
        assert!(cell.toggle_flag());

        assert_eq!(cell.reveal(), CellReveal::Blocked);
        assert!(!cell.is_revealed());
        assert_eq!(cell.view(), CellView::Flagged);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut cell = Cell::new(0, 0);
        cell.reveal();

        assert!(!cell.toggle_flag());
        assert!(!cell.is_flagged());
    }

    #[test]
    fn double_toggle_restores_flag_state() {
        let mut cell = Cell::new(0, 0);
        cell.place_bomb();
        let before = cell;

        cell.toggle_flag();
        cell.toggle_flag();

        assert_eq!(cell, before);
    }

    #[test]
    fn bombs_ignore_adjacency_increments() {
        let mut cell = Cell::new(0, 0);
        cell.place_bomb();
        cell.increment_adjacent_bomb_count();

        assert_eq!(cell.adjacent_bomb_count(), None);
    }

    #[test]
    fn adjacency_count_stops_at_eight() {
        let mut cell = Cell::new(1, 1);
        for _ in 0..300 {
            cell.increment_adjacent_bomb_count();
        }

        assert_eq!(cell.adjacent_bomb_count(), Some(8));
        assert_eq!(cell.reveal(), CellReveal::Number(8));
    }

    #[test]
    fn false_flag_only_applies_to_safe_cells() {
        let mut safe = Cell::new(0, 0);
        safe.toggle_flag();
        safe.expose_false_flag();
        assert_eq!(safe.view(), CellView::FalseFlag);

        let mut bomb = Cell::new(0, 1);
        bomb.place_bomb();
        bomb.toggle_flag();
        bomb.expose_false_flag();
        assert_eq!(bomb.view(), CellView::Flagged);
    }

    #[test]
    fn reset_keeps_coordinates() {
        let mut cell = Cell::new(4, 7);
        cell.place_bomb();
        cell.toggle_flag();
        cell.reset();

        assert_eq!(cell, Cell::new(4, 7));
        assert_eq!(cell.coords(), (4, 7));
    }
}
