//! Recruit: basic soldier whose ranks strengthen each other.
//!
//! Phalanx, the passive, grants an indefinite +1 strength for every
//! orthogonally adjacent friendly Recruit. The bonus is recomputed from
//! adjacency whenever board occupancy changes, so it rises and falls as
//! formations form and break.

use crate::abilities::{TargetList, TargetRef};
use crate::board::StepOffset;
use crate::core::PieceId;
use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::{AbilityTag, PieceTypeId};
use crate::state::MatchState;

pub struct Recruit;

impl PieceBehavior for Recruit {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        offset.is_orthogonal_up_to(1)
    }

    fn valid_passive_targets(&self, state: &MatchState, piece: PieceId) -> TargetList {
        // Phalanx only ever affects the recruit itself.
        let mut targets = TargetList::new();
        if adjacent_friendly_recruits(state, piece) > 0 {
            targets.push(TargetRef::Piece(piece));
            if let Some(tile) = state.piece(piece).and_then(|p| p.tile()) {
                targets.push(TargetRef::Tile(tile));
            }
        }
        targets
    }
}

fn adjacent_friendly_recruits(state: &MatchState, piece: PieceId) -> i8 {
    let Some(p) = state.piece(piece) else { return 0 };
    let Some(tile) = p.tile() else { return 0 };
    let owner = p.owner();

    state
        .pieces_of(owner)
        .filter(|other| {
            other.id() != piece
                && other.type_id() == PieceTypeId::Recruit
                && other
                    .tile()
                    .is_some_and(|t| t.is_adjacent_to(tile, false))
        })
        .count() as i8
}

/// Recompute every recruit's Phalanx modifier from current adjacency.
/// Runs after any occupancy change.
pub(crate) fn refresh_phalanx(state: &mut MatchState) {
    let recruits: Vec<PieceId> = state
        .pieces()
        .filter(|p| p.type_id() == PieceTypeId::Recruit && p.tile().is_some())
        .map(|p| p.id())
        .collect();

    for id in recruits {
        let count = adjacent_friendly_recruits(state, id);
        let current = state
            .piece(id)
            .and_then(|p| {
                p.modifiers()
                    .iter()
                    .find(|m| m.ability == AbilityTag::Phalanx)
                    .map(|m| m.strength_delta)
            })
            .unwrap_or(0);
        if current == count {
            continue;
        }

        let phalanx = Modifier::new(
            id,
            AbilityTag::Phalanx,
            ModifierAlignment::Friendly,
            count,
            0,
            ModifierDuration::Indefinite,
            false,
        );
        if count > 0 {
            let _ = state.add_modifier(id, phalanx);
        } else {
            let _ = state.remove_modifier(id, &phalanx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileCoords;
    use crate::core::PlayerId;
    use crate::pieces::PieceRegistry;

    fn spawn_recruit(state: &mut MatchState, owner: PlayerId, tile: TileCoords) -> PieceId {
        let registry = PieceRegistry::standard();
        let id = state.spawn_piece(registry.get(PieceTypeId::Recruit).unwrap(), owner);
        state.set_occupant(tile, Some(id)).unwrap();
        id
    }

    #[test]
    fn test_phalanx_counts_lateral_friends() {
        let mut state = MatchState::default();
        let a = spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(3, 3));
        let b = spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(3, 4));
        // Diagonal neighbor does not count.
        let c = spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(4, 4));
        // Enemy recruit does not count.
        let d = spawn_recruit(&mut state, PlayerId::TWO, TileCoords::new(2, 3));

        refresh_phalanx(&mut state);
        assert_eq!(state.piece(a).unwrap().current_strength(), 2);
        assert_eq!(state.piece(b).unwrap().current_strength(), 2);
        assert_eq!(state.piece(c).unwrap().current_strength(), 2);
        assert_eq!(state.piece(d).unwrap().current_strength(), 1);
    }

    #[test]
    fn test_phalanx_recedes_when_formation_breaks() {
        let mut state = MatchState::default();
        let a = spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(3, 3));
        let b = spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(3, 4));
        refresh_phalanx(&mut state);
        assert_eq!(state.piece(a).unwrap().current_strength(), 2);

        state.set_occupant(TileCoords::new(5, 8), Some(b)).unwrap();
        refresh_phalanx(&mut state);
        assert_eq!(state.piece(a).unwrap().current_strength(), 1);
        assert!(state.piece(a).unwrap().modifiers().is_empty());
    }

    #[test]
    fn test_phalanx_refresh_is_idempotent() {
        let mut state = MatchState::default();
        spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(3, 3));
        spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(3, 4));

        refresh_phalanx(&mut state);
        let events_after_first = state.events().len();
        refresh_phalanx(&mut state);
        assert_eq!(state.events().len(), events_after_first);
    }

    #[test]
    fn test_phalanx_survives_duration_decrements() {
        let mut state = MatchState::default();
        let a = spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(3, 3));
        spawn_recruit(&mut state, PlayerId::ONE, TileCoords::new(3, 4));
        refresh_phalanx(&mut state);

        for _ in 0..5 {
            state.decrement_durations(PlayerId::ONE);
        }
        assert_eq!(state.piece(a).unwrap().current_strength(), 2);
    }
}
