use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board edge length; the grid is always `GRID_SIZE × GRID_SIZE`.
pub const GRID_SIZE: Coord = 9;

/// The shared cell grid. Holds no game rules, only cell state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: Array2::default((GRID_SIZE, GRID_SIZE).to_nd_index()),
        }
    }

    /// Builds a board holding the given balls, for setup and tests.
    pub fn from_ball_coords(balls: &[(Coord2, Color)]) -> Result<Self> {
        let mut board = Self::new();
        for &(coords, color) in balls {
            let coords = board.validate_coords(coords)?;
            board[coords] = Cell::Ball(color);
        }
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Overwrites the cell unconditionally.
    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords] = cell;
        Ok(())
    }

    pub fn is_empty_at(&self, coords: Coord2) -> bool {
        self[coords].is_empty()
    }

    pub fn ball_at(&self, coords: Coord2) -> Option<Color> {
        self[coords].ball()
    }

    /// Empty cells in row-major order, the list spawn picks index into.
    pub fn empty_cells(&self) -> Vec<Coord2> {
        let (x_end, y_end) = self.size();
        let mut cells = Vec::new();
        for y in 0..y_end {
            for x in 0..x_end {
                if self[(x, y)].is_empty() {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.cells[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_enforce_bounds() {
        let mut board = Board::new();

        assert_eq!(board.get((9, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.set((0, 9), Cell::Empty), Err(GameError::OutOfBounds));

        board.set((8, 8), Cell::Ball(Color::Red)).unwrap();
        assert_eq!(board.get((8, 8)), Ok(Cell::Ball(Color::Red)));
        assert_eq!(board.ball_at((8, 8)), Some(Color::Red));
    }

    #[test]
    fn empty_cells_lists_row_major() {
        let mut board = Board::new();
        assert_eq!(board.empty_cells().len(), 81);

        board[(0, 0)] = Cell::Ball(Color::Blue);
        let empty = board.empty_cells();
        assert_eq!(empty.len(), 80);
        assert_eq!(empty[0], (1, 0));
        assert!(!board.is_full());
    }

    #[test]
    fn from_ball_coords_rejects_out_of_bounds() {
        let balls = [((0, 9), Color::Green)];
        assert_eq!(Board::from_ball_coords(&balls), Err(GameError::OutOfBounds));
    }
}
