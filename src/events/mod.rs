//! State-change events.
//!
//! Every mutation of match state appends an event to the journal as it
//! happens. Presentation layers (widgets, highlights, animations) and
//! non-authoritative mirrors consume the journal; the engine itself
//! never reads it back. The journal is an `im::Vector`, so cloning the
//! whole match state stays cheap.

use serde::{Deserialize, Serialize};

use crate::board::TileCoords;
use crate::combat::AttackOutcome;
use crate::core::{PieceId, PlayerId};
use crate::pieces::AbilityTag;

/// One observable state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Both players readied up and the first turn began.
    MatchStarted,
    /// A piece entered, left, or changed tiles.
    OccupancyChanged {
        piece: PieceId,
        from: Option<TileCoords>,
        to: Option<TileCoords>,
    },
    /// A piece's current strength or armor changed.
    StatsChanged {
        piece: PieceId,
        strength: i8,
        armor: i8,
    },
    ModifierAdded {
        piece: PieceId,
        source: PieceId,
        ability: AbilityTag,
    },
    ModifierRemoved {
        piece: PieceId,
        source: PieceId,
        ability: AbilityTag,
    },
    AbilityUsed {
        piece: PieceId,
        ability: AbilityTag,
    },
    CombatResolved {
        attacker: PieceId,
        defender: PieceId,
        outcome: AttackOutcome,
    },
    PieceKilled {
        piece: PieceId,
        owner: PlayerId,
    },
    /// Turn handoff completed; `turn` counts completed turns so far.
    TurnChanged {
        active: PlayerId,
        turn: u32,
    },
    MatchEnded {
        winner: Option<PlayerId>,
    },
}
