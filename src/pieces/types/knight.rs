//! Knight: mobile soldier with the Dash active ability.
//!
//! Dash relocates the knight to any unoccupied tile it could reach with
//! a normal move, without spending the move action.

use crate::abilities::{TargetList, TargetRef};
use crate::board::{StepOffset, TileCoords};
use crate::core::{PieceId, RulesError};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::movement;
use crate::state::MatchState;

pub struct Knight;

impl PieceBehavior for Knight {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        offset.is_orthogonal_up_to(2)
    }

    fn valid_active_targets(&self, state: &MatchState, piece: PieceId) -> TargetList {
        let Ok(tiles) = movement::valid_move_tiles(state, piece) else {
            return TargetList::new();
        };
        tiles
            .into_iter()
            .filter(|&tile| state.board().occupant_of(tile).is_none())
            .map(TargetRef::Tile)
            .collect()
    }

    fn active_ability_range(&self, state: &MatchState, piece: PieceId) -> Vec<TileCoords> {
        let Some(p) = state.piece(piece) else {
            return Vec::new();
        };
        let Some(from) = p.tile() else {
            return Vec::new();
        };
        let facing = p.owner().facing();
        super::tiles_matching(state, from, facing, |o| self.movement_pattern(o))
    }

    fn on_active_ability(
        &self,
        state: &mut MatchState,
        piece: PieceId,
        targets: &[TargetRef],
    ) -> Result<(), RulesError> {
        let Some(&TargetRef::Tile(destination)) = targets.first() else {
            return Err(RulesError::InvalidTarget);
        };
        state.set_occupant(destination, Some(piece))?;
        state.refresh_auras();
        Ok(())
    }
}
