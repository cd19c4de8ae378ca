use ndarray::Array2;

/// Single grid axis, used for row/column counts and positions.
pub type Coord = u8;

/// Count type used for bomb counts and cell totals.
pub type CellCount = u16;

/// Grid position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// `(rows, columns)` of an array, narrowed to [`Coord`].
pub(crate) fn grid_size<T>(array: &Array2<T>) -> Coord2 {
    let (rows, columns) = array.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        columns.try_into().unwrap_or(Coord::MAX),
    )
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        NeighborIter::new(center, grid_size(self))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays inside `bounds`.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, columns) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= columns {
        return None;
    }

    Some((next_row, next_col))
}

/// Moore neighbourhood of a cell, clipped at the grid edges.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (5, 5)).collect();
        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((2, 2), (5, 5)).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(2, 2)));
    }

    #[test]
    fn far_edge_is_clipped() {
        let neighbors: Vec<_> = NeighborIter::new((4, 2), (5, 3)).collect();
        assert_eq!(neighbors, [(3, 1), (3, 2), (4, 1)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(30, 18), 540);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
