//! Commands crossing the authority boundary.

use serde::{Deserialize, Serialize};

use crate::abilities::{TargetList, TargetRef};
use crate::board::TileCoords;
use crate::core::PieceId;
use crate::pieces::PieceTypeId;

/// One player-attributed request to mutate or query match state.
///
/// Each command is accepted or rejected atomically: a rejection never
/// leaves partial mutation behind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Place a new piece of `type_id` during setup.
    PlacePiece { type_id: PieceTypeId, tile: TileCoords },
    /// Spend the turn's move action on a relocation. Moving onto an
    /// enemy tile resolves as an attack for types that allow it.
    MovePiece { piece: PieceId, to: TileCoords },
    /// Spend the turn's move action on an attack against a reachable
    /// enemy.
    Attack {
        attacker: PieceId,
        defender: PieceId,
        /// Take the defender's tile if it dies and the attacker lives.
        relocate: bool,
    },
    /// Begin selecting a move destination: compute the piece's valid
    /// move tiles.
    RequestMoveTargets { piece: PieceId },
    /// Step one of the targeting protocol: compute and cache the valid
    /// targets of a piece's active or passive ability.
    RequestAbilityTargets { piece: PieceId, active: bool },
    /// Step two: activate the active ability against chosen targets.
    UseAbility { piece: PieceId, targets: TargetList },
    /// Finish the turn and hand over.
    EndTurn,
    /// Declare (or retract) readiness during setup.
    SetReady(bool),
}

/// What an accepted command gives back to its originator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CommandReply {
    Accepted,
    /// Reply to [`Command::RequestMoveTargets`] and
    /// [`Command::RequestAbilityTargets`].
    Targets(Vec<TargetRef>),
}
