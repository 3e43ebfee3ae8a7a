//! Per-type piece behavior.
//!
//! Piece types form a closed set, so behavior is a trait implemented
//! once per type and selected through a lookup table keyed by
//! [`PieceTypeId`]. Movement patterns are pure predicates over
//! facing-relative offsets; ability hooks receive the match state and
//! mutate it through the same operations every other caller uses.

use crate::abilities::{TargetList, TargetRef};
use crate::board::{StepOffset, TileCoords};
use crate::core::{PieceId, RulesError};
use crate::modifiers::Modifier;
use crate::state::MatchState;

use super::definition::PieceTypeId;
use super::types;

/// Behavior of one piece type.
///
/// Default implementations describe a piece with no abilities; each
/// type overrides what it has.
pub trait PieceBehavior: Sync {
    /// Pure geometric movement predicate over a facing-relative offset.
    /// Never path-aware; see [`PieceBehavior::path_aware`].
    fn movement_pattern(&self, offset: StepOffset) -> bool;

    /// Whether moves additionally require a clear path to the
    /// destination. Almost every type does.
    fn path_aware(&self) -> bool {
        true
    }

    /// Whether a move may land on an enemy-occupied tile, resolving as
    /// an attack.
    fn moves_onto_enemies(&self) -> bool {
        false
    }

    /// Targets the passive ability would affect right now.
    fn valid_passive_targets(&self, _state: &MatchState, _piece: PieceId) -> TargetList {
        TargetList::new()
    }

    /// Legal targets for the active ability.
    fn valid_active_targets(&self, _state: &MatchState, _piece: PieceId) -> TargetList {
        TargetList::new()
    }

    /// Tiles the active ability considers, independent of validity.
    fn active_ability_range(&self, _state: &MatchState, _piece: PieceId) -> Vec<TileCoords> {
        Vec::new()
    }

    /// Execute the active ability effect. Gating and bookkeeping have
    /// already happened by the time this runs.
    fn on_active_ability(
        &self,
        _state: &mut MatchState,
        piece: PieceId,
        _targets: &[TargetRef],
    ) -> Result<(), RulesError> {
        Err(RulesError::AbilityUnavailable { piece })
    }

    /// Runs at each of the owner's turn starts, and at match start for
    /// the first-turn player.
    fn on_turn_start(&self, _state: &mut MatchState, _piece: PieceId) {}

    /// Runs after a modifier is applied to this piece.
    fn on_modifier_added(&self, _state: &mut MatchState, _piece: PieceId, _modifier: &Modifier) {}

    /// Runs on the *source* piece when a modifier it created is removed
    /// from `target`, so lasting effects clean up exactly once.
    fn on_effect_ended(
        &self,
        _state: &mut MatchState,
        _source: PieceId,
        _target: PieceId,
        _modifier: &Modifier,
    ) {
    }

    /// Runs while the dying piece is still on the board.
    fn on_death(&self, _state: &mut MatchState, _piece: PieceId) {}
}

/// Look up the behavior for a piece type.
#[must_use]
pub fn behavior(type_id: PieceTypeId) -> &'static dyn PieceBehavior {
    match type_id {
        PieceTypeId::Recruit => &types::recruit::Recruit,
        PieceTypeId::AcademyRecruit => &types::academy_recruit::AcademyRecruit,
        PieceTypeId::Knight => &types::knight::Knight,
        PieceTypeId::WarMage => &types::war_mage::WarMage,
        PieceTypeId::Guardian => &types::guardian::Guardian,
        PieceTypeId::Captain => &types::captain::Captain,
        PieceTypeId::Assassin => &types::assassin::Assassin,
        PieceTypeId::Pyromancer => &types::pyromancer::Pyromancer,
        PieceTypeId::Cryomancer => &types::cryomancer::Cryomancer,
        PieceTypeId::King => &types::king::King,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_a_behavior() {
        for type_id in PieceTypeId::ALL {
            // A reachable movement pattern is the minimum every type has.
            let b = behavior(type_id);
            let reachable = (-3..=3).any(|f| {
                (-3..=3).any(|r| (f, r) != (0, 0) && b.movement_pattern(StepOffset::new(f, r)))
            });
            assert!(reachable, "{type_id} has no reachable move");
        }
    }
}
