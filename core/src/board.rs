use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cells with the start in the top-left corner and the target in the bottom-right one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord,
}

impl Board {
    /// Empty board with only the start and target cells set.
    pub fn new(size: Coord) -> Result<Self> {
        if size < 2 {
            return Err(GameError::InvalidSize);
        }
        let last = usize::from(size - 1);
        let mut cells: Array2<Cell> = Array2::default([last + 1, last + 1]);
        cells[[0, 0]] = Cell::Start;
        cells[[last, last]] = Cell::Target;
        Ok(Self { cells, size })
    }

    /// Board with an explicit set of blocked cells.
    pub fn with_blocked(size: Coord, blocked: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;
        for &coords in blocked {
            let coords = board.validate_coords(coords)?;
            if board[coords].is_fixed() && board[coords] != Cell::Blocked {
                return Err(GameError::InvalidBlockedCell);
            }
            board.cells[coords.to_nd_index()] = Cell::Blocked;
        }
        Ok(board)
    }

    /// Board with `blocked_count` distinct blocked cells drawn uniformly among the cells that are neither start nor
    /// target.
    pub fn generate<R: Rng + ?Sized>(size: Coord, blocked_count: CellCount, rng: &mut R) -> Result<Self> {
        let mut board = Self::new(size)?;
        let mut free_cells = board.total_cells() - 2;
        if blocked_count > free_cells {
            log::warn!(
                "Cannot block {} cells on a {}x{} board, only {} are free",
                blocked_count,
                size,
                size,
                free_cells
            );
            return Err(GameError::TooManyBlocked);
        }

        let mut blocked_placed = 0;
        while blocked_placed < blocked_count {
            // index among the still-free cells, shifted past every taken cell on the way
            let mut place: usize = rng.random_range(0..usize::from(free_cells));
            for (i, cell) in board.cells.iter_mut().enumerate() {
                if !cell.is_empty() {
                    place += 1;
                }
                if i == place {
                    *cell = Cell::Blocked;
                    blocked_placed += 1;
                    free_cells -= 1;
                    break;
                }
            }
        }

        log::debug!(
            "Generated {}x{} board with {} blocked cells",
            size,
            size,
            board.blocked_count()
        );
        Ok(board)
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn start(&self) -> Coord2 {
        (0, 0)
    }

    pub const fn target(&self) -> Coord2 {
        (self.size - 1, self.size - 1)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Adjacent cell in `direction`, `None` past the board edge.
    pub fn neighbor(&self, coords: Coord2, direction: Direction) -> Option<Coord2> {
        step(coords, direction, self.size)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub fn blocked_count(&self) -> CellCount {
        self.count_cells(|cell| cell == Cell::Blocked)
    }

    pub fn placed_count(&self) -> CellCount {
        self.count_cells(Cell::is_placed_pipe)
    }

    /// Every cell in row-major order with its coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub(crate) fn set(&mut self, coords: Coord2, cell: Cell) {
        self.cells[coords.to_nd_index()] = cell;
    }

    fn count_cells(&self, pred: impl Fn(Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|&&cell| pred(cell)).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
