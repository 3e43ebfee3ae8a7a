//! Command rejection taxonomy.
//!
//! Every variant is a local, recoverable rejection: the offending command
//! is refused, no state mutates, and the caller may reissue a corrected
//! command. The single exception is `MatchOver`, which is terminal:
//! once the match has ended every further mutating command is refused.

use std::fmt;

use super::entity::PieceId;
use crate::board::TileCoords;
use crate::core::PlayerId;
use crate::pieces::PieceTypeId;
use crate::state::MatchStatus;

/// Why a command was rejected by the authority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesError {
    /// The command came from the wrong player, or the action is not legal
    /// for the sender's current status (e.g. a second move in one turn).
    InvalidCommandForTurnState {
        /// The player who issued the command.
        player: PlayerId,
        /// Match status at the time of the rejection.
        status: MatchStatus,
    },

    /// The destination fails the piece's movement pattern or its
    /// clear-path requirement.
    InvalidMovement { piece: PieceId, to: TileCoords },

    /// A supplied target was not part of the most recent valid-target
    /// computation for that piece and turn.
    InvalidTarget,

    /// The ability is on cooldown or its uses are exhausted.
    AbilityUnavailable { piece: PieceId },

    /// Attempted to occupy a tile that already holds a different live
    /// piece without clearing it first. This is a programming-contract
    /// violation by the caller, not a user-facing error.
    OccupancyConflict { tile: TileCoords },

    /// A placement outside the board or the player's setup rows.
    InvalidPlacement { tile: TileCoords },

    /// The referenced piece handle does not resolve to a live piece.
    UnknownPiece(PieceId),

    /// The piece type is not in the definition registry.
    UnknownPieceType(PieceTypeId),

    /// The match has already ended; no further mutation is accepted.
    MatchOver,
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::InvalidCommandForTurnState { player, status } => {
                write!(f, "{player} may not take this action while the match is {status}")
            }
            RulesError::InvalidMovement { piece, to } => {
                write!(f, "{piece} cannot reach tile {to}")
            }
            RulesError::InvalidTarget => {
                write!(f, "target is not in the most recent valid-target set")
            }
            RulesError::AbilityUnavailable { piece } => {
                write!(f, "{piece}'s ability is on cooldown or out of uses")
            }
            RulesError::OccupancyConflict { tile } => {
                write!(f, "tile {tile} is already occupied by a live piece")
            }
            RulesError::InvalidPlacement { tile } => {
                write!(f, "tile {tile} is not a legal placement")
            }
            RulesError::UnknownPiece(piece) => {
                write!(f, "{piece} does not resolve to a live piece")
            }
            RulesError::UnknownPieceType(type_id) => {
                write!(f, "piece type {type_id} is not in the registry")
            }
            RulesError::MatchOver => write!(f, "the match has already ended"),
        }
    }
}

impl std::error::Error for RulesError {}
