//! Pyromancer: ranged mage with the Fireball active ability.
//!
//! Fireball buffs the pyromancer's strength by +2 for a turn and makes
//! a one-sided ranged attack against an enemy within three tiles of
//! taxicab distance, provided the path is clear. The pyromancer never
//! relocates and the target never counters.

use crate::abilities::{TargetList, TargetRef};
use crate::board::{StepOffset, TileCoords};
use crate::core::{PieceId, RulesError};
use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::AbilityTag;
use crate::state::MatchState;

pub struct Pyromancer;

impl PieceBehavior for Pyromancer {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        (offset.right == 0 && offset.forward.abs() == 1)
            || (offset.forward == 0 && (1..=3).contains(&offset.right.abs()))
    }

    fn valid_active_targets(&self, state: &MatchState, piece: PieceId) -> TargetList {
        let Some(p) = state.piece(piece) else {
            return TargetList::new();
        };
        let Some(from) = p.tile() else {
            return TargetList::new();
        };
        let owner = p.owner();
        let range = super::tiles_matching(state, from, owner.facing(), |o| o.manhattan() <= 3);
        super::occupant_targets(state, owner, from, &range, false)
    }

    fn active_ability_range(&self, state: &MatchState, piece: PieceId) -> Vec<TileCoords> {
        let Some(p) = state.piece(piece) else {
            return Vec::new();
        };
        let Some(from) = p.tile() else {
            return Vec::new();
        };
        super::tiles_matching(state, from, p.owner().facing(), |o| o.manhattan() <= 3)
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
            piece,
            Modifier::new(
                piece,
                AbilityTag::Fireball,
                ModifierAlignment::Friendly,
                2,
                0,
                ModifierDuration::Turns(1),
                false,
            ),
        )?;
        state.resolve_attack(piece, target, false, false)?;
        Ok(())
    }
}
