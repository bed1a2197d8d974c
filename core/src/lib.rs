#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use command::*;
pub use engine::*;
pub use error::*;
pub use flood::*;
pub use generator::*;
pub use outcome::*;
pub use tile::*;
pub use types::*;

mod command;
mod engine;
mod error;
mod flood;
mod generator;
mod outcome;
mod tile;
mod types;

/// Rows on the standard board.
pub const ROWS: Coord = 18;
/// Columns on the standard board, lettered `A` to `Y`.
pub const COLS: Coord = 25;
/// Mines on the standard board.
pub const MINES: CellCount = 96;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const STANDARD: Self = Self::new_unchecked((ROWS, COLS), MINES);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Checks that the board has cells and that at least one of them is clear.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The mine layout with every clear cell's adjacency count, fixed for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HiddenBoard {
    cells: Array2<HiddenCell>,
    mine_count: CellCount,
}

impl HiddenBoard {
    /// Builds the board from a mask where `true` marks a mine, counting neighbors for every clear cell.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows == 0
            || cols == 0
            || rows > usize::from(Coord::MAX)
            || cols > usize::from(Coord::MAX)
        {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| {
            if mine_mask[[row, col]] {
                return HiddenCell::Mine;
            }
            // both indices are below Coord::MAX, checked above
            let coords = (row as Coord, col as Coord);
            let count = mine_mask
                .iter_neighbors(coords, Neighborhood::Moore)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count();
            HiddenCell::Clear(count as u8)
        });
        // at most Coord::MAX squared, which fits a CellCount
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Ok(Self { cells, mine_count })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// Positions of every mine, row by row.
    pub fn mine_positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn iter_neighbors(&self, coords: Coord2, kind: Neighborhood) -> NeighborIter {
        self.cells.iter_neighbors(coords, kind)
    }
}

impl Index<Coord2> for HiddenBoard {
    type Output = HiddenCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// What the player sees, index-aligned with the [`HiddenBoard`] of the same game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibleBoard {
    cells: Array2<VisibleCell>,
    mine_count: CellCount,
}

impl VisibleBoard {
    /// All-hidden board.
    pub fn new(size: Coord2, mine_count: CellCount) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    /// Mines on the board this one covers.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn cell_at(&self, coords: Coord2) -> VisibleCell {
        self[coords]
    }

    pub fn hidden_count(&self) -> CellCount {
        self.count_matching(|cell| cell == VisibleCell::Hidden)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_matching(|cell| cell == VisibleCell::Flagged)
    }

    fn count_matching(&self, predicate: impl Fn(VisibleCell) -> bool) -> CellCount {
        self.cells.iter().filter(|&&cell| predicate(cell)).count() as CellCount
    }
}

impl Index<Coord2> for VisibleBoard {
    type Output = VisibleCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for VisibleBoard {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
