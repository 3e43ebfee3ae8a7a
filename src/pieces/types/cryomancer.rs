//! Cryomancer: support mage with the Freeze active ability.
//!
//! Freeze chills an enemy within two tiles of taxicab distance (clear
//! path required): -2 strength and -1 armor for one turn. When the
//! chill wears off the cryomancer's thaw hook runs, once.

use crate::abilities::{TargetList, TargetRef};
use crate::board::{StepOffset, TileCoords};
use crate::core::{PieceId, RulesError};
use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::AbilityTag;
use crate::state::MatchState;

pub struct Cryomancer;

impl PieceBehavior for Cryomancer {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        (offset.forward == 0 && offset.right.abs() == 1)
            || (offset.right == 0 && (1..=3).contains(&offset.forward.abs()))
    }

    fn valid_active_targets(&self, state: &MatchState, piece: PieceId) -> TargetList {
        let Some(p) = state.piece(piece) else {
            return TargetList::new();
        };
        let Some(from) = p.tile() else {
            return TargetList::new();
        };
        let owner = p.owner();
        let range = super::tiles_matching(state, from, owner.facing(), |o| o.manhattan() <= 2);
        super::occupant_targets(state, owner, from, &range, false)
    }

    fn active_ability_range(&self, state: &MatchState, piece: PieceId) -> Vec<TileCoords> {
        let Some(p) = state.piece(piece) else {
            return Vec::new();
        };
        let Some(from) = p.tile() else {
            return Vec::new();
        };
        super::tiles_matching(state, from, p.owner().facing(), |o| o.manhattan() <= 2)
    }

    fn on_active_ability(
        &self,
        state: &mut MatchState,
        piece: PieceId,
        targets: &[TargetRef],
    ) -> Result<(), RulesError> {
        let target = targets
            .first()
            .and_then(|&t| super::target_piece(state, t))
            .ok_or(RulesError::InvalidTarget)?;
        state.add_modifier(
            target,
            Modifier::new(
                piece,
                AbilityTag::Freeze,
                ModifierAlignment::Hostile,
                -2,
                -1,
                ModifierDuration::Turns(1),
                false,
            ),
        )
    }

    fn on_effect_ended(
        &self,
        _state: &mut MatchState,
        source: PieceId,
        target: PieceId,
        _modifier: &Modifier,
    ) {
        // The thaw itself is presentation; the stat recovery already
        // happened when the modifier came off.
        log::debug!("{target} thawed from {source}'s freeze");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities;
    use crate::core::PlayerId;
    use crate::events::MatchEvent;
    use crate::pieces::{PieceRegistry, PieceTypeId};

    #[test]
    fn test_freeze_debuffs_then_thaws() {
        let registry = PieceRegistry::standard();
        let mut state = MatchState::default();
        let cryo =
            state.spawn_piece(registry.get(PieceTypeId::Cryomancer).unwrap(), PlayerId::ONE);
        let enemy = state.spawn_piece(registry.get(PieceTypeId::Knight).unwrap(), PlayerId::TWO);
        state.set_occupant(TileCoords::new(3, 3), Some(cryo)).unwrap();
        state.set_occupant(TileCoords::new(4, 4), Some(enemy)).unwrap();

        abilities::request_targets(&mut state, cryo, true).unwrap();
        abilities::use_active(&mut state, &registry, cryo, &[TargetRef::Piece(enemy)]).unwrap();

        assert_eq!(state.piece(enemy).unwrap().current_strength(), 1);
        assert_eq!(state.piece(enemy).unwrap().current_armor(), 1);

        // The debuff rides the defender's own turn cycle.
        state.decrement_durations(PlayerId::TWO);
        assert_eq!(state.piece(enemy).unwrap().current_strength(), 3);
        assert!(state.events().iter().any(|e| matches!(
            e,
            MatchEvent::ModifierRemoved {
                ability: AbilityTag::Freeze,
                ..
            }
        )));
    }

    #[test]
    fn test_freeze_cannot_reach_past_two_tiles() {
        let registry = PieceRegistry::standard();
        let mut state = MatchState::default();
        let cryo =
            state.spawn_piece(registry.get(PieceTypeId::Cryomancer).unwrap(), PlayerId::ONE);
        let enemy = state.spawn_piece(registry.get(PieceTypeId::Knight).unwrap(), PlayerId::TWO);
        state.set_occupant(TileCoords::new(3, 3), Some(cryo)).unwrap();
        state.set_occupant(TileCoords::new(3, 6), Some(enemy)).unwrap();

        let targets = abilities::request_targets(&mut state, cryo, true).unwrap();
        assert!(targets.is_empty());
    }
}
