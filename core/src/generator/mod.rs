use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait BombGenerator {
    fn generate(self, config: BoardConfig) -> BombLayout;
}

/// Bomb positions for one generation of a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BombLayout {
    bomb_mask: Array2<bool>,
    bomb_count: CellCount,
}

impl BombLayout {
    /// Fails when either side of the mask does not fit in a [`Coord`].
    pub fn from_bomb_mask(bomb_mask: Array2<bool>) -> Result<Self> {
        let (rows, columns) = bomb_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows > max || columns > max {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::from_sized_mask(bomb_mask))
    }

    /// Mask dimensions must already fit in a [`Coord`].
    pub(crate) fn from_sized_mask(bomb_mask: Array2<bool>) -> Self {
        let bomb_count = bomb_mask
            .iter()
            .filter(|&&is_bomb| is_bomb)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            bomb_mask,
            bomb_count,
        }
    }

    pub fn from_bomb_coords(size: Coord2, bomb_coords: &[Coord2]) -> Result<Self> {
        let mut bomb_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in bomb_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            bomb_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_sized_mask(bomb_mask))
    }

    /// Board configuration this layout describes, validated like any other.
    pub fn board_config(&self) -> Result<BoardConfig> {
        let (rows, columns) = self.size();
        BoardConfig::new(rows, columns, self.bomb_count)
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.bomb_mask)
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn contains_bomb(&self, coords: Coord2) -> bool {
        self.bomb_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn adjacent_bomb_count(&self, coords: Coord2) -> u8 {
        let count = self
            .bomb_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count();
        // at most 8 neighbours
        count as u8
    }
}

impl Index<Coord2> for BombLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.bomb_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_coords_counts_unique_bombs() {
        let layout = BombLayout::from_bomb_coords((3, 4), &[(0, 0), (2, 3), (0, 0)]).unwrap();

        assert_eq!(layout.bomb_count(), 2);
        assert_eq!(layout.size(), (3, 4));
        assert!(layout.contains_bomb((0, 0)));
        assert!(layout.contains_bomb((2, 3)));
        assert!(!layout.contains_bomb((1, 1)));
        assert!(!layout.contains_bomb((3, 0)));
    }

    #[test]
    fn from_coords_rejects_out_of_grid_bomb() {
        assert_eq!(
            BombLayout::from_bomb_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn from_mask_rejects_oversize_grid() {
        let mut mask: Array2<bool> = Array2::default([300, 2]);
        mask[[43, 0]] = true;
        mask[[299, 0]] = true;

        assert_eq!(
            BombLayout::from_bomb_mask(mask),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            BombLayout::from_bomb_mask(Array2::default([2, 256])),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn from_mask_accepts_largest_grid() {
        let mut mask: Array2<bool> = Array2::default([255, 2]);
        mask[[254, 1]] = true;

        let layout = BombLayout::from_bomb_mask(mask).unwrap();
        assert_eq!(layout.size(), (255, 2));
        assert_eq!(layout.bomb_count(), 1);
        assert!(layout.contains_bomb((254, 1)));
    }

    #[test]
    fn adjacent_count_matches_neighbors() {
        let layout = BombLayout::from_bomb_coords((3, 3), &[(0, 0), (0, 1), (2, 2)]).unwrap();

        assert_eq!(layout.adjacent_bomb_count((1, 1)), 3);
        assert_eq!(layout.adjacent_bomb_count((2, 0)), 0);
        assert_eq!(layout.adjacent_bomb_count((1, 0)), 2);
    }

    #[test]
    fn full_layout_is_not_a_valid_board() {
        let layout = BombLayout::from_bomb_mask(Array2::from_elem([2, 2], true)).unwrap();
        assert!(layout.board_config().is_err());
    }
}
