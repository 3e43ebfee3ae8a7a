//! King: the commander. Its death ends the match.
//!
//! Rally, the once-per-match active ability, grants +2 armor for one
//! turn to every friendly piece, with no range limit.

use crate::abilities::{TargetList, TargetRef};
use crate::board::{StepOffset, TileCoords};
use crate::core::{PieceId, RulesError};
use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::AbilityTag;
use crate::state::MatchState;

pub struct King;

impl PieceBehavior for King {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        offset.chebyshev() == 1
    }

    fn valid_active_targets(&self, state: &MatchState, piece: PieceId) -> TargetList {
        let Some(owner) = state.piece(piece).map(|p| p.owner()) else {
            return TargetList::new();
        };
        state
            .pieces_of(owner)
            .filter(|p| p.tile().is_some())
            .map(|p| TargetRef::Piece(p.id()))
            .collect()
    }

    fn active_ability_range(&self, state: &MatchState, _piece: PieceId) -> Vec<TileCoords> {
        // Unlimited range.
        state.board().all_tiles().collect()
    }

    fn on_active_ability(
        &self,
        state: &mut MatchState,
        piece: PieceId,
        _targets: &[TargetRef],
    ) -> Result<(), RulesError> {
        // Rally always hits the whole army, whatever was clicked.
        let owner = state
            .piece(piece)
            .map(|p| p.owner())
            .ok_or(RulesError::UnknownPiece(piece))?;
        let friends: Vec<PieceId> = state
            .pieces_of(owner)
            .filter(|p| p.tile().is_some())
            .map(|p| p.id())
            .collect();
        for friend in friends {
            state.add_modifier(
                friend,
                Modifier::new(
                    piece,
                    AbilityTag::Rally,
                    ModifierAlignment::Friendly,
                    0,
                    2,
                    ModifierDuration::Turns(1),
                    false,
                ),
            )?;
        }
        Ok(())
    }

    fn on_death(&self, state: &mut MatchState, piece: PieceId) {
        if let Some(owner) = state.piece(piece).map(|p| p.owner()) {
            log::debug!("{owner}'s commander has fallen");
            state.end_match(Some(owner.opponent()));
        }
    }
}
