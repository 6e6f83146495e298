use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("No inventory item with that id")]
    ItemNotFound,
    #[error("Invalid placement: {0}")]
    InvalidPlacement(#[from] PlacementError),
    #[error("Board must be at least 2x2")]
    InvalidSize,
    #[error("Too many blocked cells for the board")]
    TooManyBlocked,
    #[error("Start and target cells cannot be blocked")]
    InvalidBlockedCell,
    #[error("Level index outside the catalog")]
    InvalidLevel,
    #[error("Command not accepted in the current session state")]
    InvalidState,
}

/// Reason a move was refused; the board, inventory and budget are left untouched.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("flow is running")]
    FlowActive,
    #[error("cell is fixed")]
    FixedCell,
    #[error("cell is already occupied")]
    Occupied,
    #[error("cell has no pipe")]
    NotOccupied,
    #[error("no moves left")]
    NoMovesLeft,
}

pub type Result<T> = core::result::Result<T, GameError>;
