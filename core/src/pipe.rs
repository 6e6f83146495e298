use serde::{Deserialize, Serialize};

use crate::*;

/// Shape of a pipe piece, or one of the fixed markers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeType {
    StraightVertical,
    StraightHorizontal,
    CornerTopRight,
    CornerTopLeft,
    CornerBottomRight,
    CornerBottomLeft,
    Start,
    Target,
    Blocked,
}

impl PipeType {
    pub const STRAIGHTS: [PipeType; 2] = [Self::StraightVertical, Self::StraightHorizontal];

    pub const CORNERS: [PipeType; 4] = [
        Self::CornerTopRight,
        Self::CornerTopLeft,
        Self::CornerBottomRight,
        Self::CornerBottomLeft,
    ];

    /// Directions this pipe connects to.
    ///
    /// Placeable pipes always open towards exactly two directions. The start
    /// marker emits towards south and east, the target accepts flow from
    /// anywhere and a blocked cell connects nothing.
    pub const fn connections(self) -> Directions {
        use PipeType::*;
        match self {
            StraightVertical => Directions::NORTH.union(Directions::SOUTH),
            StraightHorizontal => Directions::EAST.union(Directions::WEST),
            CornerTopRight => Directions::NORTH.union(Directions::EAST),
            CornerTopLeft => Directions::NORTH.union(Directions::WEST),
            CornerBottomRight => Directions::SOUTH.union(Directions::EAST),
            CornerBottomLeft => Directions::SOUTH.union(Directions::WEST),
            Start => Directions::EAST.union(Directions::SOUTH),
            Target => Directions::all(),
            Blocked => Directions::empty(),
        }
    }

    /// Next orientation in the rotation cycle.
    ///
    /// Straights alternate between vertical and horizontal, corners turn
    /// clockwise through all four orientations. Markers never rotate.
    pub const fn rotated(self) -> Self {
        use PipeType::*;
        match self {
            StraightVertical => StraightHorizontal,
            StraightHorizontal => StraightVertical,
            CornerTopRight => CornerBottomRight,
            CornerBottomRight => CornerBottomLeft,
            CornerBottomLeft => CornerTopLeft,
            CornerTopLeft => CornerTopRight,
            Start => Start,
            Target => Target,
            Blocked => Blocked,
        }
    }

    pub const fn is_placeable(self) -> bool {
        !self.is_marker()
    }

    pub const fn is_marker(self) -> bool {
        matches!(self, Self::Start | Self::Target | Self::Blocked)
    }

    pub const fn is_straight(self) -> bool {
        matches!(self, Self::StraightVertical | Self::StraightHorizontal)
    }

    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::CornerTopRight
                | Self::CornerTopLeft
                | Self::CornerBottomRight
                | Self::CornerBottomLeft
        )
    }

    /// Whether flow entering through `side` is accepted.
    pub fn accepts_from(self, side: Direction) -> bool {
        self.connections().has(side)
    }

    /// The single side flow leaves through after entering via `arrival`.
    ///
    /// Only meaningful for placeable pipes, which have exactly one other opening.
    pub fn outlet(self, arrival: Direction) -> Option<Direction> {
        let connections = self.connections();
        if !self.is_placeable() || !connections.has(arrival) {
            return None;
        }
        connections
            .difference(arrival.as_set())
            .iter_directions()
            .next()
    }
}
