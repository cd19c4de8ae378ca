use alloc::vec::Vec;

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Draw random cells and retry on collisions. Unbounded in the worst case, slows down as the board fills up.
    Rejection,
    /// Shuffle all cells and take a prefix. Always linear in the number of cells.
    Shuffle,
}

impl Default for Placement {
    fn default() -> Self {
        Self::Rejection
    }
}

/// Purely random bomb placement, reproducible from `seed`.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBombGenerator {
    seed: u64,
    placement: Placement,
}

impl RandomBombGenerator {
    pub fn new(seed: u64, placement: Placement) -> Self {
        Self { seed, placement }
    }
}

impl BombGenerator for RandomBombGenerator {
    fn generate(self, config: BoardConfig) -> BombLayout {
        use rand::prelude::*;

        let (rows, columns) = config.size();
        let total_cells = config.total_cells();
        let mut bombs: Array2<bool> = Array2::default(config.size().to_nd_index());

        // full boards can't be rejection sampled in reasonable time
        if config.bombs() >= total_cells {
            log::warn!(
                "Board already full, generated anyway, requested {} but only fits {}",
                config.bombs(),
                total_cells
            );
            bombs.fill(true);
            return BombLayout::from_sized_mask(bombs);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        match self.placement {
            Placement::Rejection => {
                if u32::from(config.bombs()) * 2 > u32::from(total_cells) {
                    log::debug!(
                        "Rejection sampling {} bombs into {} cells, expect many retries",
                        config.bombs(),
                        total_cells
                    );
                }
                let mut placed = 0;
                let mut draws: u64 = 0;
                while placed < config.bombs() {
                    let coords = (rng.random_range(0..rows), rng.random_range(0..columns));
                    draws += 1;
                    let cell = &mut bombs[coords.to_nd_index()];
                    if !*cell {
                        *cell = true;
                        placed += 1;
                    }
                }
                log::trace!("Placed {} bombs in {} draws", placed, draws);
            }
            Placement::Shuffle => {
                let mut indices: Vec<CellCount> = (0..total_cells).collect();
                let (chosen, _) = indices.partial_shuffle(&mut rng, config.bombs().into());
                let cells = bombs
                    .as_slice_mut()
                    .expect("freshly allocated array is in standard layout");
                for &index in chosen.iter() {
                    cells[usize::from(index)] = true;
                }
            }
        }

        let layout = BombLayout::from_sized_mask(bombs);
        // double check bomb count
        if layout.bomb_count() != config.bombs() {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.bomb_count(),
                config.bombs()
            );
        }
        layout
    }
}
