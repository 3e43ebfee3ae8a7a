//! Guardian: defensive paladin with the Bulwark active ability.
//!
//! Bulwark grants a nearby friendly piece +2 armor for one turn. Its
//! reach is every adjacent tile plus the straight tiles two away.

use crate::abilities::{TargetList, TargetRef};
use crate::board::{StepOffset, TileCoords};
use crate::core::{PieceId, RulesError};
use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::AbilityTag;
use crate::state::MatchState;

pub struct Guardian;

fn bulwark_range(offset: StepOffset) -> bool {
    offset.chebyshev() == 1 || (offset.is_orthogonal_up_to(2) && offset.manhattan() == 2)
}

impl PieceBehavior for Guardian {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        offset.is_diagonal_up_to(2)
    }

    fn valid_active_targets(&self, state: &MatchState, piece: PieceId) -> TargetList {
        let Some(p) = state.piece(piece) else {
            return TargetList::new();
        };
        let Some(from) = p.tile() else {
            return TargetList::new();
        };
        let owner = p.owner();
        let range = super::tiles_matching(state, from, owner.facing(), bulwark_range);
        super::occupant_targets(state, owner, from, &range, true)
    }

    fn active_ability_range(&self, state: &MatchState, piece: PieceId) -> Vec<TileCoords> {
        let Some(p) = state.piece(piece) else {
            return Vec::new();
        };
        let Some(from) = p.tile() else {
            return Vec::new();
        };
        super::tiles_matching(state, from, p.owner().facing(), bulwark_range)
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
                AbilityTag::Bulwark,
                ModifierAlignment::Friendly,
                0,
                2,
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
        // Presentation reacts to the removal event; nothing more to undo.
        log::debug!("bulwark from {source} faded on {target}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities;
    use crate::core::PlayerId;
    use crate::pieces::{PieceRegistry, PieceTypeId};

    #[test]
    fn test_bulwark_buffs_then_expires_with_hook() {
        let registry = PieceRegistry::standard();
        let mut state = MatchState::default();
        let guardian =
            state.spawn_piece(registry.get(PieceTypeId::Guardian).unwrap(), PlayerId::ONE);
        let ally = state.spawn_piece(registry.get(PieceTypeId::Recruit).unwrap(), PlayerId::ONE);
        state.set_occupant(TileCoords::new(3, 3), Some(guardian)).unwrap();
        state.set_occupant(TileCoords::new(3, 4), Some(ally)).unwrap();

        let targets = abilities::request_targets(&mut state, guardian, true).unwrap();
        assert!(targets.contains(&TargetRef::Piece(ally)));
        assert!(targets.contains(&TargetRef::Tile(TileCoords::new(3, 4))));

        abilities::use_active(&mut state, &registry, guardian, &[TargetRef::Piece(ally)]).unwrap();
        assert_eq!(state.piece(ally).unwrap().current_armor(), 3);

        state.decrement_durations(PlayerId::ONE);
        assert_eq!(state.piece(ally).unwrap().current_armor(), 1);
        assert!(state.piece(ally).unwrap().modifiers().is_empty());
    }

    #[test]
    fn test_bulwark_ignores_enemies_and_far_allies() {
        let registry = PieceRegistry::standard();
        let mut state = MatchState::default();
        let guardian =
            state.spawn_piece(registry.get(PieceTypeId::Guardian).unwrap(), PlayerId::ONE);
        let enemy = state.spawn_piece(registry.get(PieceTypeId::Recruit).unwrap(), PlayerId::TWO);
        let far = state.spawn_piece(registry.get(PieceTypeId::Recruit).unwrap(), PlayerId::ONE);
        state.set_occupant(TileCoords::new(3, 3), Some(guardian)).unwrap();
        state.set_occupant(TileCoords::new(3, 4), Some(enemy)).unwrap();
        state.set_occupant(TileCoords::new(3, 6), Some(far)).unwrap();

        let targets = abilities::request_targets(&mut state, guardian, true).unwrap();
        assert!(targets.is_empty());
    }
}
