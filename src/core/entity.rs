//! Entity identification.
//!
//! Every piece on the board has a stable `PieceId` handle. Handles are
//! allocated by the match state and never reused within a match, so a
//! stale handle is always detectable (the arena lookup fails) rather
//! than silently pointing at a different piece.

use serde::{Deserialize, Serialize};

/// Stable handle for a piece in the match arena.
///
/// Handles index into `MatchState`'s piece arena. A handle for a dead
/// piece no longer resolves; callers that require a live piece use
/// `MatchState::piece`, which surfaces `RulesError::UnknownPiece`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a piece handle from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PieceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}
