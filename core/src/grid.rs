use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of one cell. Mines and counts are kept apart, see [`MineLayout`] and [`compute_adjacency`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub i: Coord,
    pub j: Coord,
    pub is_opened: bool,
    pub has_flag: bool,
}

impl Cell {
    pub const fn new((i, j): Coord2) -> Self {
        Self {
            i,
            j,
            is_opened: false,
            has_flag: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.i, self.j)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(width: Coord, height: Coord) -> Self {
        let cells = Array2::from_shape_fn((height, width).to_nd_index(), |(i, j)| {
            Cell::new((i as Coord, j as Coord))
        });
        Self { cells }
    }

    /// Shape as `(height, width)`.
    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        self.cells
            .get(coords.to_nd_index())
            .ok_or(GameError::IndexOutOfRange)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        self.cells
            .get_mut(coords.to_nd_index())
            .ok_or(GameError::IndexOutOfRange)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

/// Fresh unopened, unflagged cells for a `width` x `height` board, row-major.
pub fn create_grid(width: Coord, height: Coord) -> Vec<Cell> {
    Grid::new(width, height).cells().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    #[test]
    fn create_grid_covers_rectangle_once() {
        let cells = create_grid(5, 3);

        assert_eq!(cells.len(), 15);
        let unique: BTreeSet<_> = cells.iter().map(Cell::coords).collect();
        assert_eq!(unique.len(), 15);
        assert!(unique.iter().all(|&(i, j)| i < 3 && j < 5));
        assert!(cells.iter().all(|cell| !cell.is_opened && !cell.has_flag));
    }

    #[test]
    fn create_grid_is_row_major() {
        let cells = create_grid(3, 2);

        assert_eq!(cells[0].coords(), (0, 0));
        assert_eq!(cells[2].coords(), (0, 2));
        assert_eq!(cells[3].coords(), (1, 0));
        assert_eq!(cells[5].coords(), (1, 2));
    }

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let grid = Grid::new(4, 2);

        assert_eq!(grid.size(), (2, 4));
        assert_eq!(grid.cell((1, 3)).map(Cell::coords), Ok((1, 3)));
        assert_eq!(grid.cell((2, 0)), Err(GameError::IndexOutOfRange));
        assert_eq!(grid.cell((0, 4)), Err(GameError::IndexOutOfRange));
    }
}
