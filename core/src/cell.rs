use serde::{Deserialize, Serialize};

use crate::*;

/// Content of a single board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Pipe(PipeType),
    Start,
    Target,
    Blocked,
}

/// Coarse classification of a cell, as shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Occupied,
    FixedStart,
    FixedTarget,
    Blocked,
}

impl Cell {
    pub const fn kind(self) -> CellKind {
        match self {
            Self::Empty => CellKind::Empty,
            Self::Pipe(_) => CellKind::Occupied,
            Self::Start => CellKind::FixedStart,
            Self::Target => CellKind::FixedTarget,
            Self::Blocked => CellKind::Blocked,
        }
    }

    /// Pipe carried by the cell; blocked and empty cells carry none.
    pub const fn pipe_type(self) -> Option<PipeType> {
        match self {
            Self::Pipe(pipe) => Some(pipe),
            Self::Start => Some(PipeType::Start),
            Self::Target => Some(PipeType::Target),
            Self::Empty | Self::Blocked => None,
        }
    }

    /// Fixed cells can never be placed into or cleared by the player.
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Start | Self::Target | Self::Blocked)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_placed_pipe(self) -> bool {
        matches!(self, Self::Pipe(_))
    }
}
