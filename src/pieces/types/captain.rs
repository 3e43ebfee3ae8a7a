//! Captain: heroic paladin that rallies its neighbors.
//!
//! Inspire runs at each of the owner's turn starts (and at match start
//! for player 1): every orthogonally adjacent friendly piece gains +1
//! strength and +1 armor for the turn.

use crate::abilities::{TargetList, TargetRef};
use crate::board::StepOffset;
use crate::core::PieceId;
use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::AbilityTag;
use crate::state::MatchState;

pub struct Captain;

fn inspire_targets(state: &MatchState, piece: PieceId) -> Vec<PieceId> {
    let Some(p) = state.piece(piece) else {
        return Vec::new();
    };
    let Some(tile) = p.tile() else {
        return Vec::new();
    };
    let owner = p.owner();

    state
        .pieces_of(owner)
        .filter(|other| {
            other.id() != piece
                && other
                    .tile()
                    .is_some_and(|t| t.is_adjacent_to(tile, false))
        })
        .map(|other| other.id())
        .collect()
}

impl PieceBehavior for Captain {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        offset.is_diagonal_up_to(2)
    }

    fn valid_passive_targets(&self, state: &MatchState, piece: PieceId) -> TargetList {
        let mut targets = TargetList::new();
        for id in inspire_targets(state, piece) {
            targets.push(TargetRef::Piece(id));
            if let Some(tile) = state.piece(id).and_then(|p| p.tile()) {
                targets.push(TargetRef::Tile(tile));
            }
        }
        targets
    }

    fn on_turn_start(&self, state: &mut MatchState, piece: PieceId) {
        for target in inspire_targets(state, piece) {
            let _ = state.add_modifier(
                target,
                Modifier::new(
                    piece,
                    AbilityTag::Inspire,
                    ModifierAlignment::Friendly,
                    1,
                    1,
                    ModifierDuration::Turns(1),
                    false,
                ),
            );
        }
    }
}
