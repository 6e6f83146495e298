use serde::{Deserialize, Serialize};

use crate::*;

/// Board, unplaced pieces and move budget of one level attempt.
///
/// All player moves go through here. A refused move reports why and leaves
/// every part of the state as it was.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    inventory: Inventory,
    moves_left: CellCount,
    flow_active: bool,
}

impl PlayEngine {
    pub fn new(board: Board, inventory: Inventory, moves: CellCount) -> Self {
        Self {
            board,
            inventory,
            moves_left: moves,
            flow_active: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn moves_left(&self) -> CellCount {
        self.moves_left
    }

    pub fn is_flow_active(&self) -> bool {
        self.flow_active
    }

    pub(crate) fn set_flow_active(&mut self, active: bool) {
        self.flow_active = active;
    }

    /// Puts an inventory piece on an empty cell, spending one move.
    pub fn place(&mut self, id: ItemId, coords: Coord2) -> Result<PipeType> {
        let coords = self.board.validate_coords(coords)?;
        self.check_flow_inactive()?;

        match self.board[coords] {
            Cell::Empty => {}
            cell if cell.is_fixed() => return Err(PlacementError::FixedCell.into()),
            _ => return Err(PlacementError::Occupied.into()),
        }
        if self.moves_left == 0 {
            return Err(PlacementError::NoMovesLeft.into());
        }

        let item = self.inventory.remove(id)?;
        self.board.set(coords, Cell::Pipe(item.pipe));
        self.moves_left -= 1;
        log::debug!(
            "Placed {:?} {} at {:?}, {} moves left",
            item.pipe,
            item.id,
            coords,
            self.moves_left
        );
        Ok(item.pipe)
    }

    /// Takes a placed pipe back into the inventory as a new item, refunding one move.
    pub fn remove(&mut self, coords: Coord2) -> Result<ItemId> {
        let coords = self.board.validate_coords(coords)?;
        let pipe = self.placed_pipe_at(coords)?;

        self.board.set(coords, Cell::Empty);
        let id = self.inventory.add(pipe);
        self.moves_left = self.moves_left.saturating_add(1);
        log::debug!(
            "Removed {:?} at {:?} as {}, {} moves left",
            pipe,
            coords,
            id,
            self.moves_left
        );
        Ok(id)
    }

    /// Turns a placed pipe to its next orientation; rotating is free.
    pub fn rotate_at(&mut self, coords: Coord2) -> Result<PipeType> {
        let coords = self.board.validate_coords(coords)?;
        let pipe = self.placed_pipe_at(coords)?.rotated();

        self.board.set(coords, Cell::Pipe(pipe));
        log::trace!("Rotated pipe at {:?} to {:?}", coords, pipe);
        Ok(pipe)
    }

    /// Turns an unplaced piece; also free.
    pub fn rotate_item(&mut self, id: ItemId) -> Result<PipeType> {
        self.check_flow_inactive()?;
        self.inventory.rotate_in_place(id)
    }

    pub fn trace(&self) -> FlowTrace {
        trace_flow(&self.board)
    }

    pub fn hint(&self) -> Hint {
        hint(&self.board, self.inventory.len(), self.moves_left)
    }

    fn placed_pipe_at(&self, coords: Coord2) -> Result<PipeType> {
        self.check_flow_inactive()?;
        match self.board[coords] {
            Cell::Pipe(pipe) => Ok(pipe),
            cell if cell.is_fixed() => Err(PlacementError::FixedCell.into()),
            _ => Err(PlacementError::NotOccupied.into()),
        }
    }

    fn check_flow_inactive(&self) -> Result<()> {
        if self.flow_active {
            Err(PlacementError::FlowActive.into())
        } else {
            Ok(())
        }
    }
}
