use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Order in which the start cell's outlets are tried.
const START_OUTLETS: [Direction; 2] = [Direction::East, Direction::South];

/// Cells from start to target, both included, in flow order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPath(Vec<Coord2>);

impl FlowPath {
    pub fn cells(&self) -> &[Coord2] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakCause {
    /// Flow would leave the board.
    Edge,
    /// Nothing placed where the flow is heading.
    Empty,
    Blocked,
    /// Next pipe has no opening facing the flow.
    Misaligned,
    /// Flow returned to a cell it already passed.
    Cycle,
}

/// Where and why a trace stopped short of the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowBreak {
    /// Cells the flow passed before stopping, starting at the start cell.
    pub partial: Vec<Coord2>,
    /// Last cell reached.
    pub at: Coord2,
    /// Direction the flow was heading when it stopped.
    pub heading: Direction,
    pub cause: BreakCause,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowTrace {
    Connected(FlowPath),
    Broken(FlowBreak),
}

impl FlowTrace {
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    pub fn path(&self) -> Option<&FlowPath> {
        match self {
            Self::Connected(path) => Some(path),
            Self::Broken(_) => None,
        }
    }
}

/// Follows the flow from the start cell through the placed pipes.
///
/// Every placeable pipe has exactly two openings, so once the flow has
/// entered a cell its continuation is unique and the trace never branches.
/// Only the start cell has two outlets; each is followed on its own and the
/// first one reaching the target wins. When none does, the break that got
/// farthest is reported.
pub fn trace_flow(board: &Board) -> FlowTrace {
    let [first, rest @ ..] = START_OUTLETS;
    let mut farthest = match trace_outlet(board, first) {
        Ok(path) => return FlowTrace::Connected(path),
        Err(flow_break) => flow_break,
    };

    for outlet in rest {
        match trace_outlet(board, outlet) {
            Ok(path) => return FlowTrace::Connected(path),
            Err(flow_break) if flow_break.partial.len() > farthest.partial.len() => farthest = flow_break,
            Err(_) => {}
        }
    }
    FlowTrace::Broken(farthest)
}

fn trace_outlet(board: &Board, outlet: Direction) -> core::result::Result<FlowPath, FlowBreak> {
    let traced = trace_from_start(board, outlet);
    match &traced {
        Ok(path) => log::debug!("Flow connected through {} cells", path.len()),
        Err(flow_break) => log::trace!(
            "Flow leaving start {:?} stopped at {:?}: {:?}",
            outlet,
            flow_break.at,
            flow_break.cause
        ),
    }
    traced
}

fn trace_from_start(board: &Board, outlet: Direction) -> core::result::Result<FlowPath, FlowBreak> {
    let start = board.start();
    let mut visited = BTreeSet::from([start]);
    let mut path = Vec::from([start]);
    let mut current = start;
    let mut heading = outlet;

    let stop = |path: Vec<Coord2>, at, heading, cause| FlowBreak {
        partial: path,
        at,
        heading,
        cause,
    };

    loop {
        let Some(next) = board.neighbor(current, heading) else {
            return Err(stop(path, current, heading, BreakCause::Edge));
        };
        let entry_side = heading.opposite();

        let pipe = match board[next] {
            Cell::Target => {
                path.push(next);
                return Ok(FlowPath(path));
            }
            Cell::Empty => return Err(stop(path, current, heading, BreakCause::Empty)),
            Cell::Blocked => return Err(stop(path, current, heading, BreakCause::Blocked)),
            Cell::Start => return Err(stop(path, current, heading, BreakCause::Cycle)),
            Cell::Pipe(pipe) => pipe,
        };

        if !pipe.accepts_from(entry_side) {
            return Err(stop(path, current, heading, BreakCause::Misaligned));
        }
        if !visited.insert(next) {
            return Err(stop(path, current, heading, BreakCause::Cycle));
        }

        log::trace!("Flow entered {:?} from {:?}", next, entry_side);
        path.push(next);
        current = next;

        heading = match pipe.outlet(entry_side) {
            Some(outlet) => outlet,
            None => return Err(stop(path, current, heading, BreakCause::Misaligned)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PipeType::*;

    fn board_with(size: Coord, pipes: &[(Coord2, PipeType)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(coords, pipe) in pipes {
            board.set(coords, Cell::Pipe(pipe));
        }
        board
    }

    #[test]
    fn two_by_two_diagonal_connects() {
        let board = board_with(2, &[((0, 1), CornerBottomLeft), ((1, 0), CornerTopRight)]);

        let trace = trace_flow(&board);

        assert_eq!(
            trace.path().map(FlowPath::cells),
            Some(&[(0, 0), (0, 1), (1, 1)][..])
        );
    }

    #[test]
    fn two_by_two_either_corner_alone_connects() {
        let east = board_with(2, &[((0, 1), CornerBottomLeft)]);
        let south = board_with(2, &[((1, 0), CornerTopRight)]);

        assert!(trace_flow(&east).is_connected());
        assert_eq!(
            trace_flow(&south).path().map(FlowPath::cells),
            Some(&[(0, 0), (1, 0), (1, 1)][..])
        );
    }

    #[test]
    fn two_by_two_rotated_corners_break() {
        let board = board_with(2, &[((0, 1), CornerTopLeft), ((1, 0), CornerBottomRight)]);

        let FlowTrace::Broken(flow_break) = trace_flow(&board) else {
            panic!("rotated corners must not connect");
        };
        assert_eq!(flow_break.cause, BreakCause::Edge);
    }

    #[test]
    fn two_by_two_single_rotated_corner_breaks() {
        let board = board_with(2, &[((0, 1), CornerBottomRight)]);

        assert!(!trace_flow(&board).is_connected());
    }

    #[test]
    fn five_by_five_manhattan_path() {
        let board = board_with(
            5,
            &[
                ((0, 1), StraightHorizontal),
                ((0, 2), StraightHorizontal),
                ((0, 3), StraightHorizontal),
                ((0, 4), CornerBottomLeft),
                ((1, 4), StraightVertical),
                ((2, 4), StraightVertical),
                ((3, 4), StraightVertical),
            ],
        );

        let FlowTrace::Connected(path) = trace_flow(&board) else {
            panic!("path along the top and right edges must connect");
        };
        assert_eq!(path.len(), 9);
        assert_eq!(path.cells().first(), Some(&(0, 0)));
        assert_eq!(path.cells().last(), Some(&(4, 4)));
    }

    #[test]
    fn straights_to_the_edge_do_not_reach_target() {
        let board = board_with(
            5,
            &[
                ((0, 1), StraightHorizontal),
                ((0, 2), StraightHorizontal),
                ((0, 3), StraightHorizontal),
                ((0, 4), StraightHorizontal),
            ],
        );

        let FlowTrace::Broken(flow_break) = trace_flow(&board) else {
            panic!("straight row cannot turn towards the target");
        };
        assert_eq!(flow_break.at, (0, 4));
        assert_eq!(flow_break.cause, BreakCause::Edge);
        assert_eq!(flow_break.partial.len(), 5);
    }

    #[test]
    fn misaligned_pipe_breaks_flow() {
        let board = board_with(3, &[((0, 1), StraightVertical)]);

        let FlowTrace::Broken(flow_break) = trace_flow(&board) else {
            panic!("vertical pipe cannot take flow from the west");
        };
        assert_eq!(flow_break.cause, BreakCause::Misaligned);
        assert_eq!(flow_break.at, (0, 0));
    }

    #[test]
    fn blocked_cell_breaks_flow() {
        let mut board = Board::with_blocked(3, &[(0, 2), (1, 0)]).unwrap();
        board.set((0, 1), Cell::Pipe(StraightHorizontal));

        let FlowTrace::Broken(flow_break) = trace_flow(&board) else {
            panic!("blocked cells stop the flow");
        };
        assert_eq!(flow_break.cause, BreakCause::Blocked);
        assert_eq!(flow_break.partial, [(0, 0), (0, 1)]);
    }

    #[test]
    fn loop_back_into_start_is_a_cycle() {
        let board = board_with(
            3,
            &[
                ((0, 1), CornerBottomLeft),
                ((1, 1), CornerTopLeft),
                ((1, 0), CornerTopRight),
            ],
        );

        let trace = trace_flow(&board);

        let FlowTrace::Broken(flow_break) = trace else {
            panic!("loop cannot reach the target");
        };
        assert_eq!(flow_break.cause, BreakCause::Cycle);
    }

    #[test]
    fn farthest_break_is_reported() {
        let board = board_with(
            4,
            &[
                ((1, 0), StraightVertical),
                ((2, 0), StraightVertical),
            ],
        );

        let FlowTrace::Broken(flow_break) = trace_flow(&board) else {
            panic!("column stops before the target");
        };
        assert_eq!(flow_break.partial, [(0, 0), (1, 0), (2, 0)]);
        assert_eq!(flow_break.heading, Direction::South);
        assert_eq!(flow_break.cause, BreakCause::Empty);
    }

    #[test]
    fn empty_board_reports_east_outlet_on_tie() {
        let board = Board::new(3).unwrap();

        let FlowTrace::Broken(flow_break) = trace_flow(&board) else {
            panic!("empty board cannot connect");
        };
        assert_eq!(flow_break.partial, [(0, 0)]);
        assert_eq!(flow_break.at, (0, 0));
        assert_eq!(flow_break.heading, Direction::East);
        assert_eq!(flow_break.cause, BreakCause::Empty);
    }
}
