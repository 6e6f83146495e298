use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board side length and positions.
pub type Coord = u8;

/// Count type used for cell counts, piece counts and move budgets.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
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

/// Compass direction on the board, north is row 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            North => South,
            South => North,
            East => West,
            West => East,
        }
    }

    /// `(row, col)` displacement of one step in this direction.
    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            North => (-1, 0),
            South => (1, 0),
            East => (0, 1),
            West => (0, -1),
        }
    }

    pub const fn as_set(self) -> Directions {
        use Direction::*;
        match self {
            North => Directions::NORTH,
            South => Directions::SOUTH,
            East => Directions::EAST,
            West => Directions::WEST,
        }
    }
}

bitflags! {
    /// Set of directions a pipe opens towards.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Directions: u8 {
        const NORTH = 0b0001;
        const SOUTH = 0b0010;
        const EAST = 0b0100;
        const WEST = 0b1000;
    }
}

impl Directions {
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.as_set())
    }

    /// Member directions in `Direction::ALL` order.
    pub fn iter_directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.has(direction))
    }
}

/// Applies one step in `direction` to `coords`, returning a value only when it remains in bounds.
pub fn step(coords: Coord2, direction: Direction, size: Coord) -> Option<Coord2> {
    let (row, col) = coords;
    let (drow, dcol) = direction.delta();

    let next_row = row.checked_add_signed(drow)?;
    if next_row >= size {
        return None;
    }

    let next_col = col.checked_add_signed(dcol)?;
    if next_col >= size {
        return None;
    }

    Some((next_row, next_col))
}

/// Orthogonal neighbors of a cell together with the direction leading to them.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = (Direction, Coord2);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let direction = *Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = step(self.center, direction, self.size) {
                return Some((direction, next_item));
            }
        }
    }
}
