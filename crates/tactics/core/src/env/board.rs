use crate::state::{HexCoord, HexState};

/// Static board oracle exposing terrain per hex.
pub trait BoardOracle: Send + Sync {
    fn dimensions(&self) -> BoardDimensions;

    /// Terrain of the hex, or `None` when the hex is off the board.
    fn hex(&self, coord: HexCoord) -> Option<HexState>;

    fn contains(&self, coord: HexCoord) -> bool {
        self.dimensions().contains(coord)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardDimensions {
    pub width: u32,
    pub height: u32,
}

impl BoardDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        coord.col >= 0
            && coord.row >= 0
            && coord.col < self.width as i32
            && coord.row < self.height as i32
    }
}
