use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Qualitative answer to "can I still make it with what I have".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    PathMayExist,
    NoPath,
}

impl Hint {
    pub const fn is_possible(self) -> bool {
        matches!(self, Self::PathMayExist)
    }
}

/// Fewest new pieces needed for any route from start to target, ignoring orientation.
///
/// Placed pipes are free to pass through since rotating them costs no move,
/// empty cells cost one piece each and blocked cells are impassable. Returns
/// `None` when the blocked cells wall the target off completely.
pub fn pieces_needed(board: &Board) -> Option<CellCount> {
    let size = board.size();
    let mut cost: Array2<CellCount> = Array2::from_elem([usize::from(size), usize::from(size)], CellCount::MAX);
    let start = board.start();
    let target = board.target();

    cost[start.to_nd_index()] = 0;
    let mut to_visit = VecDeque::from([start]);

    while let Some(visit_coords) = to_visit.pop_front() {
        let visit_cost = cost[visit_coords.to_nd_index()];
        if visit_coords == target {
            log::trace!("Hint search reached target needing {} pieces", visit_cost);
            return Some(visit_cost);
        }

        for (_, next) in board.iter_neighbors(visit_coords) {
            let step_cost = match board[next] {
                Cell::Blocked | Cell::Start => continue,
                Cell::Empty => 1,
                Cell::Pipe(_) | Cell::Target => 0,
            };
            let next_cost = visit_cost + step_cost;
            if next_cost >= cost[next.to_nd_index()] {
                continue;
            }
            cost[next.to_nd_index()] = next_cost;
            if step_cost == 0 {
                to_visit.push_front(next);
            } else {
                to_visit.push_back(next);
            }
        }
    }

    None
}

/// Whether some arrangement of the available pieces could still join start and target.
///
/// Only the number of pieces is considered, never their shapes, and the
/// route found is deliberately not returned.
pub fn hint(board: &Board, available_pieces: usize, moves_left: CellCount) -> Hint {
    match pieces_needed(board) {
        Some(needed) if usize::from(needed) <= available_pieces && needed <= moves_left => {
            log::debug!(
                "Hint: route needs {} of {} pieces, {} moves left",
                needed,
                available_pieces,
                moves_left
            );
            Hint::PathMayExist
        }
        needed => {
            log::debug!(
                "Hint: no route, needs {:?} with {} pieces and {} moves left",
                needed,
                available_pieces,
                moves_left
            );
            Hint::NoPath
        }
    }
}
