use alloc::collections::VecDeque;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Ready
    }
}

/// The minefield: owns every cell and drives generation, reveals, flags and game end.
///
/// Callers address cells by `(row, col)` only; the board never hands out mutable cell references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    remaining_safe_cells: CellCount,
    flags_placed: CellCount,
    state: BoardState,
    triggered_bomb: Option<Coord2>,
    placement: Placement,
    next_seed: u64,
}

impl Board {
    /// Random board with rejection-sampled bombs.
    pub fn new(rows: Coord, columns: Coord, bomb_count: CellCount, seed: u64) -> Result<Self> {
        let config = BoardConfig::new(rows, columns, bomb_count)?;
        Ok(Self::with_placement(config, seed, Placement::default()))
    }

    pub fn for_difficulty(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_placement(difficulty.config(), seed, Placement::default())
    }

    pub fn with_placement(config: BoardConfig, seed: u64, placement: Placement) -> Self {
        let mut board = Self::empty(config, placement, seed);
        board.generate();
        board
    }

    /// Board with a fixed first layout. `seed` only drives later resets.
    pub fn from_layout(layout: &BombLayout, seed: u64) -> Result<Self> {
        let config = layout.board_config()?;
        let mut board = Self::empty(config, Placement::default(), seed);
        board.apply_layout(layout);
        Ok(board)
    }

    fn empty(config: BoardConfig, placement: Placement, seed: u64) -> Self {
        let cells = Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
            Cell::new(row as Coord, col as Coord)
        });
        Self {
            config,
            cells,
            remaining_safe_cells: config.safe_cells(),
            flags_placed: 0,
            state: Default::default(),
            triggered_bomb: None,
            placement,
            next_seed: seed,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn columns(&self) -> Coord {
        self.config.columns()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn bomb_count(&self) -> CellCount {
        self.config.bombs()
    }

    pub fn remaining_safe_cells(&self) -> CellCount {
        self.remaining_safe_cells
    }

    pub fn revealed_safe_cells(&self) -> CellCount {
        self.config.safe_cells() - self.remaining_safe_cells
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Remaining-bomb counter shown to the player, never below zero.
    pub fn bombs_left(&self) -> CellCount {
        self.bomb_count().saturating_sub(self.flags_placed)
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn triggered_bomb(&self) -> Option<Coord2> {
        self.triggered_bomb
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn cell(&self, row: Coord, col: Coord) -> Option<&Cell> {
        self.cells.get((row, col).to_nd_index())
    }

    pub fn cell_view(&self, row: Coord, col: Coord) -> Option<CellView> {
        let cell = self.cell(row, col)?;
        if self.triggered_bomb == Some((row, col)) {
            Some(CellView::Exploded)
        } else {
            Some(cell.view())
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Places a fresh random layout over the existing cells.
    pub fn generate(&mut self) {
        use rand::prelude::*;

        let seed = self.next_seed;
        self.next_seed = SmallRng::seed_from_u64(seed).random();
        let layout = RandomBombGenerator::new(seed, self.placement).generate(self.config);
        self.apply_layout(&layout);
    }

    pub fn reset(&mut self) {
        log::debug!(
            "Resetting {}x{} board with {} bombs",
            self.rows(),
            self.columns(),
            self.bomb_count()
        );
        self.generate();
    }

    fn apply_layout(&mut self, layout: &BombLayout) {
        let (rows, columns) = self.size();
        for cell in self.cells.iter_mut() {
            cell.reset();
            let coords = cell.coords();
            if layout.contains_bomb(coords) {
                cell.place_bomb();
                continue;
            }
            for _ in 0..layout.adjacent_bomb_count(coords) {
                cell.increment_adjacent_bomb_count();
            }
        }

        self.remaining_safe_cells = self.config.total_cells() - layout.bomb_count();
        self.flags_placed = 0;
        self.state = BoardState::Ready;
        self.triggered_bomb = None;
        log::debug!(
            "Generated {}x{} board, {} bombs, {} safe cells",
            rows,
            columns,
            layout.bomb_count(),
            self.remaining_safe_cells
        );
    }

    pub fn reveal_tile(&mut self, row: Coord, col: Coord) -> RevealOutcome {
        use RevealOutcome::*;

        let coords = (row, col);
        let Some(&cell) = self.cells.get(coords.to_nd_index()) else {
            return Blocked(BlockReason::OutOfBounds);
        };
        if cell.is_revealed() {
            return AlreadyRevealed;
        }
        if self.state.is_finished() {
            return Blocked(BlockReason::GameOver);
        }
        if cell.is_flagged() {
            return Blocked(BlockReason::Flagged);
        }

        if cell.is_bomb() {
            self.cells[coords.to_nd_index()].reveal();
            self.triggered_bomb = Some(coords);
            self.end_game(false);
            return Loss { row, col };
        }

        let flipped = if cell.is_blank() {
            self.flood_fill(coords)
        } else {
            self.cells[coords.to_nd_index()].reveal();
            1
        };
        self.remaining_safe_cells = self.remaining_safe_cells.saturating_sub(flipped);

        if self.remaining_safe_cells == 0 {
            self.end_game(true);
            Win(flipped)
        } else {
            self.mark_started();
            Continue(flipped)
        }
    }

    /// Breadth-first reveal of the blank region around `start` and its numbered border.
    ///
    /// Returns how many cells flipped from hidden to revealed. Flags stop the fill and
    /// bombs are never entered.
    fn flood_fill(&mut self, start: Coord2) -> CellCount {
        let size = self.size();
        let mut visited: Array2<bool> = Array2::default(self.cells.raw_dim());
        let mut to_visit = VecDeque::from([start]);
        visited[start.to_nd_index()] = true;
        let mut flipped = 0;

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if cell.is_bomb() || cell.is_flagged() || cell.is_revealed() {
                continue;
            }
            cell.reveal();
            flipped += 1;

            if !cell.is_blank() {
                continue;
            }

            for pos in NeighborIter::new(coords, size) {
                let neighbor = self.cells[pos.to_nd_index()];
                if visited[pos.to_nd_index()] || neighbor.is_revealed() {
                    continue;
                }
                visited[pos.to_nd_index()] = true;

                if neighbor.is_flagged() || neighbor.is_bomb() {
                    continue;
                }
                if neighbor.is_blank() {
                    to_visit.push_back(pos);
                } else {
                    self.cells[pos.to_nd_index()].reveal();
                    flipped += 1;
                }
            }
        }

        log::trace!("Flood fill from {:?} flipped {} cells", start, flipped);
        flipped
    }

    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> FlagOutcome {
        use FlagOutcome::*;

        let bomb_count = self.bomb_count();
        let Some(cell) = self.cells.get_mut((row, col).to_nd_index()) else {
            return Blocked(BlockReason::OutOfBounds);
        };
        if self.state.is_finished() {
            return Blocked(BlockReason::GameOver);
        }
        if cell.is_revealed() {
            return Blocked(BlockReason::Revealed);
        }

        let outcome = if cell.is_flagged() {
            cell.toggle_flag();
            self.flags_placed -= 1;
            Unflagged
        } else if self.flags_placed >= bomb_count {
            return Blocked(BlockReason::NoFlagsLeft);
        } else {
            cell.toggle_flag();
            self.flags_placed += 1;
            Flagged
        };
        self.mark_started();
        outcome
    }

    /// Loss display: reveals unflagged bombs and marks flags on safe cells as false.
    ///
    /// Only acts on a lost board.
    pub fn expose_all_bombs(&mut self) {
        if self.state != BoardState::Lost {
            log::warn!("Ignoring bomb exposure on a board in state {:?}", self.state);
            return;
        }
        for cell in self.cells.iter_mut() {
            if cell.is_flagged() && !cell.is_bomb() {
                cell.expose_false_flag();
            } else if cell.is_bomb() && !cell.is_flagged() {
                cell.reveal();
            }
        }
    }

    /// Win display: every bomb ends up flagged. Only acts on a won board.
    pub fn mark_all_bombs_flagged(&mut self) {
        if self.state != BoardState::Won {
            log::warn!("Ignoring bomb flagging on a board in state {:?}", self.state);
            return;
        }
        for cell in self.cells.iter_mut() {
            if cell.is_bomb() && !cell.is_flagged() {
                cell.set_flag();
            }
        }
        self.flags_placed = self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount;
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = BoardState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        if won {
            self.triggered_bomb = None;
        }
        log::debug!("Game ended, won: {}", won);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        for row in self.cells.rows() {
            for cell in row {
                let symbol = match self.cell_view(cell.row(), cell.col()).unwrap_or_default() {
                    CellView::Hidden => '#',
                    CellView::Flagged => 'F',
                    CellView::Open(0) => '.',
                    CellView::Open(count) => char::from(b'0' + count),
                    CellView::Mine => '*',
                    CellView::Exploded => 'X',
                    CellView::FalseFlag => '!',
                };
                f.write_char(symbol)?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
