//! Board layout and mine placement.

use crate::config::PlacementPolicy;
use crate::engine::types::{Cell, CellIndex, MineCount, GRID_CELLS};
use crate::errors::RoundError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fixed 5x5 grid of cell labels.
///
/// Invariant: exactly `mine_count` cells are `Mine`, the rest `Safe`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; GRID_CELLS],
    mine_count: MineCount,
}

impl Board {
    /// Scatter `mine_count` mines according to the placement policy.
    pub fn place(mine_count: MineCount, policy: PlacementPolicy, rng: &mut impl Rng) -> Self {
        let mut cells = [Cell::Safe; GRID_CELLS];

        match policy {
            PlacementPolicy::Resample => {
                // Uniform draws, rejecting collisions. Terminates because
                // mine_count < GRID_CELLS is guaranteed by the type.
                let mut placed = 0;
                while placed < mine_count.get() {
                    let index = rng.gen_range(0..GRID_CELLS);
                    if cells[index] == Cell::Safe {
                        cells[index] = Cell::Mine;
                        placed += 1;
                    }
                }
            }
            PlacementPolicy::Shuffle => {
                for cell in cells.iter_mut().take(mine_count.get() as usize) {
                    *cell = Cell::Mine;
                }
                cells.shuffle(rng);
            }
        }

        Self { cells, mine_count }
    }

    /// Build a board with mines at explicit positions. Used for replaying
    /// recorded rounds and for deterministic tests.
    pub fn with_mines(positions: &[usize]) -> Result<Self, RoundError> {
        let mine_count = MineCount::new(positions.len() as u8)?;
        let mut cells = [Cell::Safe; GRID_CELLS];
        for &position in positions {
            let index = CellIndex::new(position)?;
            if cells[index.get()] == Cell::Mine {
                return Err(RoundError::DuplicateMinePosition(position));
            }
            cells[index.get()] = Cell::Mine;
        }
        Ok(Self { cells, mine_count })
    }

    pub fn cell(&self, index: CellIndex) -> Cell {
        self.cells[index.get()]
    }

    pub fn mine_count(&self) -> MineCount {
        self.mine_count
    }

    /// Indices of all mine cells, in board order
    pub fn mine_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Mine)
            .map(|(index, _)| index)
            .collect()
    }
}
