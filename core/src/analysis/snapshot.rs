use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer needs to draw one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub kind: CellKind,
    pub pipe: Option<PipeType>,
    /// Whether the flow has already filled this cell.
    pub flowing: bool,
}

/// Read-only copy of everything a UI shell displays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub level_index: usize,
    pub level_name: String,
    pub level_count: usize,
    pub score: u32,
    pub stars: u32,
    pub moves_left: CellCount,
    pub state: SessionState,
    pub cells: Array2<CellView>,
    pub inventory: Vec<InventoryItem>,
}

impl SessionSnapshot {
    pub fn from_session<G: LevelGenerator>(session: &Session<G>) -> Self {
        let board = session.board();
        let flowing = session.flow_progress();
        let size = usize::from(board.size());
        let mut cells = Array2::from_elem(
            [size, size],
            CellView {
                kind: CellKind::Empty,
                pipe: None,
                flowing: false,
            },
        );

        for (coords, cell) in board.iter_cells() {
            cells[coords.to_nd_index()] = CellView {
                kind: cell.kind(),
                pipe: cell.pipe_type(),
                flowing: flowing.contains(&coords),
            };
        }

        Self {
            level_index: session.level_index(),
            level_name: session.level_name().into(),
            level_count: session.catalog().len(),
            score: session.score(),
            stars: session.stars(),
            moves_left: session.moves_left(),
            state: session.state(),
            cells,
            inventory: session.inventory().list().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_maps_cells_and_inventory() {
        let session = Session::new(LevelCatalog::default(), 17).unwrap();

        let snapshot = session.snapshot();

        assert_eq!(snapshot.level_name, "Beginner");
        assert_eq!(snapshot.level_count, 7);
        assert_eq!(snapshot.state, SessionState::Setup);
        assert_eq!(snapshot.cells.dim(), (5, 5));
        assert_eq!(snapshot.cells[(0, 0)].kind, CellKind::FixedStart);
        assert_eq!(snapshot.cells[(0, 0)].pipe, Some(PipeType::Start));
        assert_eq!(snapshot.cells[(4, 4)].kind, CellKind::FixedTarget);
        assert_eq!(snapshot.cells[(2, 2)].pipe, None);
        assert_eq!(snapshot.inventory.len(), 10);
    }

    #[test]
    fn snapshot_marks_flowing_cells() {
        let catalog = LevelCatalog::new(Vec::from([LevelConfig::new("Pair", 2, 0, 8, 3, 0)])).unwrap();
        let mut session = Session::new(catalog, 1).unwrap();
        let id = session.inventory().list()[0].id;
        session.place(id, (0, 1)).unwrap();
        while session.board()[(0, 1)] != Cell::Pipe(PipeType::CornerBottomLeft) {
            session.rotate((0, 1)).unwrap();
        }

        session.start_flow().unwrap();
        session.advance_flow().unwrap();
        session.advance_flow().unwrap();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.state, SessionState::Flowing);
        assert!(snapshot.cells[(0, 0)].flowing);
        assert!(snapshot.cells[(0, 1)].flowing);
        assert!(!snapshot.cells[(1, 1)].flowing);
        assert_eq!(snapshot.moves_left, 2);
    }

    #[test]
    fn snapshot_serializes_for_the_shell() {
        let session = Session::new(LevelCatalog::default(), 3).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(json["level_name"], "Beginner");
        assert_eq!(json["state"], "Setup");
        assert_eq!(json["moves_left"], 20);
    }
}
