//! Tile coordinates and facing-relative offsets.
//!
//! Coordinates are absolute board positions: x counts columns, y counts
//! rows. Movement and targeting patterns are written as `StepOffset`s in
//! (forward, right) terms relative to the owning player's facing, so the
//! same pattern works for both sides of the board.

use serde::{Deserialize, Serialize};

/// Fixed integer coordinates of a board tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoords {
    /// Column.
    pub x: i8,
    /// Row.
    pub y: i8,
}

impl TileCoords {
    /// Create tile coordinates.
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The offset of `self` as seen from `origin` by a player with the
    /// given facing sign (`+1` for player 1, `-1` for player 2).
    #[must_use]
    pub fn offset_from(self, origin: TileCoords, facing: i8) -> StepOffset {
        StepOffset {
            forward: (self.y - origin.y) * facing,
            right: (self.x - origin.x) * facing,
        }
    }

    /// Whether `other` is adjacent to `self`, laterally or (optionally)
    /// diagonally.
    #[must_use]
    pub fn is_adjacent_to(self, other: TileCoords, diagonal: bool) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx + dy == 1 {
            return true;
        }
        diagonal && dx == 1 && dy == 1
    }

    /// Tiles strictly between `self` and `to` along a shared orthogonal
    /// or diagonal line. Empty when the two tiles do not share one.
    pub fn between(self, to: TileCoords) -> Vec<TileCoords> {
        let dx = to.x - self.x;
        let dy = to.y - self.y;

        let aligned = dx == 0 || dy == 0 || dx.abs() == dy.abs();
        if !aligned {
            return Vec::new();
        }

        let steps = dx.abs().max(dy.abs());
        let sx = dx.signum();
        let sy = dy.signum();
        (1..steps)
            .map(|i| TileCoords::new(self.x + sx * i, self.y + sy * i))
            .collect()
    }
}

impl std::fmt::Display for TileCoords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A (forward, right) step relative to a player's facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOffset {
    /// Steps toward the opponent's side.
    pub forward: i8,
    /// Steps to the owning player's right.
    pub right: i8,
}

impl StepOffset {
    /// Create a step offset.
    #[must_use]
    pub const fn new(forward: i8, right: i8) -> Self {
        Self { forward, right }
    }

    /// Taxicab distance of the step.
    #[must_use]
    pub fn manhattan(self) -> i8 {
        self.forward.abs() + self.right.abs()
    }

    /// Chessboard distance of the step.
    #[must_use]
    pub fn chebyshev(self) -> i8 {
        self.forward.abs().max(self.right.abs())
    }

    /// A straight lateral or forward/backward step of 1..=`max` tiles.
    #[must_use]
    pub fn is_orthogonal_up_to(self, max: i8) -> bool {
        let d = self.manhattan();
        d >= 1 && d <= max && (self.forward == 0 || self.right == 0)
    }

    /// A straight diagonal step of 1..=`max` tiles.
    #[must_use]
    pub fn is_diagonal_up_to(self, max: i8) -> bool {
        let d = self.forward.abs();
        d >= 1 && d <= max && d == self.right.abs()
    }
}
