//! Assassin: fragile rogue that slips through the lines.
//!
//! Moves diagonally one tile or in long (3,1)/(1,3) jumps, ignoring
//! blockers, and may land on enemy-occupied tiles to attack. Backstab
//! buffs its strength by +2 for a turn and strikes the enemy directly
//! behind it without a counter.

use crate::abilities::{TargetList, TargetRef};
use crate::board::{StepOffset, TileCoords};
use crate::core::{PieceId, RulesError};
use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::AbilityTag;
use crate::state::MatchState;

pub struct Assassin;

fn behind(state: &MatchState, piece: PieceId) -> Option<TileCoords> {
    let p = state.piece(piece)?;
    let from = p.tile()?;
    let facing = p.owner().facing();
    let tile = TileCoords::new(from.x, from.y - facing);
    state.board().contains(tile).then_some(tile)
}

impl PieceBehavior for Assassin {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        let shape = (offset.forward.abs(), offset.right.abs());
        matches!(shape, (1, 1) | (3, 1) | (1, 3))
    }

    fn path_aware(&self) -> bool {
        false
    }

    fn moves_onto_enemies(&self) -> bool {
        true
    }

    fn valid_active_targets(&self, state: &MatchState, piece: PieceId) -> TargetList {
        let mut targets = TargetList::new();
        let Some(owner) = state.piece(piece).map(|p| p.owner()) else {
            return targets;
        };
        if let Some(tile) = behind(state, piece) {
            if let Some(occupant) = state.board().occupant_of(tile) {
                if state.piece(occupant).is_some_and(|p| p.owner() != owner) {
                    targets.push(TargetRef::Piece(occupant));
                    targets.push(TargetRef::Tile(tile));
                }
            }
        }
        targets
    }

    fn active_ability_range(&self, state: &MatchState, piece: PieceId) -> Vec<TileCoords> {
        behind(state, piece).into_iter().collect()
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
                AbilityTag::Backstab,
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
