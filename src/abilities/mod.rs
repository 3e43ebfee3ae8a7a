//! Ability targeting and activation.
//!
//! ## Two-step protocol
//!
//! Target selection is split across two commands. The first computes the
//! valid-target set for a piece (read-only apart from caching it); the
//! second supplies the chosen targets, which must be a subset of the most
//! recently cached set for the same piece and turn. Anything else is
//! rejected with `InvalidTarget` before any mutation. An abandoned
//! selection needs no cancellation: the next request overwrites the
//! cache, and turn handoff clears it.
//!
//! Activation gates on the piece's cooldown and remaining uses, spends
//! both, then hands off to the piece's behavior for the effect itself.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::TileCoords;
use crate::core::{PieceId, PlayerId, RulesError};
use crate::events::MatchEvent;
use crate::pieces::behavior::behavior;
use crate::pieces::PieceRegistry;
use crate::state::MatchState;

/// A selectable target: a piece, or the tile it stands on. Abilities
/// that accept pieces usually list both forms so a player can click
/// either.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    Piece(PieceId),
    Tile(TileCoords),
}

/// Inline-allocated target list.
pub type TargetList = SmallVec<[TargetRef; 8]>;

/// The most recently computed valid-target set, kept for validating the
/// follow-up activation command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetCache {
    pub piece: PieceId,
    /// Computed for the active ability (as opposed to the passive).
    pub active: bool,
    /// Turn counter at computation time; a stale turn invalidates it.
    pub turn: u32,
    pub targets: TargetList,
}

/// Compute the valid-target set for a piece's active or passive ability
/// without caching it.
pub fn valid_targets(state: &MatchState, piece: PieceId, active: bool) -> Result<TargetList, RulesError> {
    let behavior = state
        .piece(piece)
        .map(|p| behavior(p.type_id()))
        .ok_or(RulesError::UnknownPiece(piece))?;
    Ok(if active {
        behavior.valid_active_targets(state, piece)
    } else {
        behavior.valid_passive_targets(state, piece)
    })
}

/// Compute and cache the valid-target set. Step one of the protocol.
pub fn request_targets(state: &mut MatchState, piece: PieceId, active: bool) -> Result<TargetList, RulesError> {
    let targets = valid_targets(state, piece, active)?;
    state.set_target_cache(TargetCache {
        piece,
        active,
        turn: state.turn(),
        targets: targets.clone(),
    });
    Ok(targets)
}

/// The superset of tiles the active ability considers, independent of
/// target validity. Presentation uses this to indicate reachable area.
pub fn active_ability_range(state: &MatchState, piece: PieceId) -> Result<Vec<TileCoords>, RulesError> {
    let behavior = state
        .piece(piece)
        .map(|p| behavior(p.type_id()))
        .ok_or(RulesError::UnknownPiece(piece))?;
    Ok(behavior.active_ability_range(state, piece))
}

/// Step two of the protocol: activate a piece's active ability against
/// chosen targets.
///
/// The targets must be a non-empty subset of the cached set computed for
/// this piece and turn. On success the ability's uses and cooldown are
/// spent before the effect runs, and the cache is cleared.
pub fn use_active(
    state: &mut MatchState,
    registry: &PieceRegistry,
    piece: PieceId,
    targets: &[TargetRef],
) -> Result<(), RulesError> {
    let (type_id, ready) = {
        let p = state.piece(piece).ok_or(RulesError::UnknownPiece(piece))?;
        (p.type_id(), p.active_ability_ready())
    };
    let profile = registry
        .get(type_id)
        .and_then(|d| d.active)
        .ok_or(RulesError::AbilityUnavailable { piece })?;
    if !ready {
        return Err(RulesError::AbilityUnavailable { piece });
    }

    let cached_ok = state.target_cache().is_some_and(|cache| {
        cache.piece == piece
            && cache.active
            && cache.turn == state.turn()
            && !targets.is_empty()
            && targets.iter().all(|t| cache.targets.contains(t))
    });
    if !cached_ok {
        return Err(RulesError::InvalidTarget);
    }

    if let Some(p) = state.piece_mut(piece) {
        p.spend_active(profile.base_cooldown);
    }
    state.emit(MatchEvent::AbilityUsed {
        piece,
        ability: profile.tag,
    });
    log::debug!("{piece} used {}", profile.tag);

    behavior(type_id).on_active_ability(state, piece, targets)?;
    state.clear_target_cache();
    Ok(())
}

/// Run every turn-start passive belonging to `player`'s pieces. Invoked
/// on turn handoff, and at match start for the first-turn player.
pub fn run_turn_start_passives(state: &mut MatchState, registry: &PieceRegistry, player: PlayerId) {
    let ids: Vec<PieceId> = state.pieces_of(player).map(|p| p.id()).collect();
    for id in ids {
        // A hook may have killed the piece in the meantime.
        let Some(piece) = state.piece(id) else { continue };
        let type_id = piece.type_id();
        if !piece.passive_ability_ready() {
            continue;
        }
        let Some(profile) = registry.get(type_id).and_then(|d| d.passive) else {
            continue;
        };
        behavior(type_id).on_turn_start(state, id);
        if let Some(p) = state.piece_mut(id) {
            p.spend_passive(profile.base_cooldown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileCoords;
    use crate::pieces::PieceTypeId;

    fn placed(type_id: PieceTypeId, tile: TileCoords) -> (MatchState, PieceRegistry, PieceId) {
        let registry = PieceRegistry::standard();
        let mut state = MatchState::default();
        let id = state.spawn_piece(registry.get(type_id).unwrap(), PlayerId::ONE);
        state.set_occupant(tile, Some(id)).unwrap();
        (state, registry, id)
    }

    #[test]
    fn test_use_without_request_is_rejected() {
        let (mut state, registry, knight) = placed(PieceTypeId::Knight, TileCoords::new(3, 3));
        let err = use_active(
            &mut state,
            &registry,
            knight,
            &[TargetRef::Tile(TileCoords::new(3, 4))],
        )
        .unwrap_err();
        assert_eq!(err, RulesError::InvalidTarget);
        // Nothing was spent.
        assert!(state.piece(knight).unwrap().active_ability_ready());
    }

    #[test]
    fn test_target_outside_cached_set_is_rejected() {
        let (mut state, registry, knight) = placed(PieceTypeId::Knight, TileCoords::new(3, 3));
        request_targets(&mut state, knight, true).unwrap();

        // (5, 5) is not a knight dash destination from (3, 3).
        let err = use_active(
            &mut state,
            &registry,
            knight,
            &[TargetRef::Tile(TileCoords::new(5, 5))],
        )
        .unwrap_err();
        assert_eq!(err, RulesError::InvalidTarget);
    }

    #[test]
    fn test_cached_targets_go_stale_across_turns() {
        let (mut state, registry, knight) = placed(PieceTypeId::Knight, TileCoords::new(3, 3));
        request_targets(&mut state, knight, true).unwrap();
        state.advance_turn();

        let err = use_active(
            &mut state,
            &registry,
            knight,
            &[TargetRef::Tile(TileCoords::new(3, 4))],
        )
        .unwrap_err();
        assert_eq!(err, RulesError::InvalidTarget);
    }

    #[test]
    fn test_dash_relocates_and_spends() {
        let (mut state, registry, knight) = placed(PieceTypeId::Knight, TileCoords::new(3, 3));
        let destination = TileCoords::new(3, 5);

        let targets = request_targets(&mut state, knight, true).unwrap();
        assert!(targets.contains(&TargetRef::Tile(destination)));

        use_active(&mut state, &registry, knight, &[TargetRef::Tile(destination)]).unwrap();
        assert_eq!(state.piece(knight).unwrap().tile(), Some(destination));
        assert_eq!(state.piece(knight).unwrap().active_cooldown(), 2);
        assert!(!state.piece(knight).unwrap().active_ability_ready());
    }

    #[test]
    fn test_cooldown_gates_second_use() {
        let (mut state, registry, knight) = placed(PieceTypeId::Knight, TileCoords::new(3, 3));
        let destination = TileCoords::new(3, 5);
        request_targets(&mut state, knight, true).unwrap();
        use_active(&mut state, &registry, knight, &[TargetRef::Tile(destination)]).unwrap();

        request_targets(&mut state, knight, true).unwrap();
        let err = use_active(
            &mut state,
            &registry,
            knight,
            &[TargetRef::Tile(TileCoords::new(3, 3))],
        )
        .unwrap_err();
        assert_eq!(err, RulesError::AbilityUnavailable { piece: knight });
    }
}
