//! Modifier bookkeeping on `MatchState`.
//!
//! `add_modifier` merges equal modifiers instead of appending duplicates:
//! a stackable entry sums deltas under the configured [`StackingPolicy`]
//! cap, a non-stackable one is refreshed to the incoming deltas. Either
//! way the duration is replaced by the newest application. Removal fires
//! the source piece's effect-ended hook exactly once, while durations
//! decrement once per completed turn for the owner whose turn ended.

use smallvec::SmallVec;

use crate::core::{PieceId, PlayerId, RulesError};
use crate::events::MatchEvent;
use crate::pieces::behavior::behavior;
use crate::state::{MatchState, StackingPolicy};

use super::Modifier;

fn cap_delta(value: i8, policy: StackingPolicy) -> i8 {
    match policy {
        StackingPolicy::Unbounded => value,
        StackingPolicy::Cap(limit) => value.clamp(-limit, limit),
    }
}

impl MatchState {
    /// Apply a modifier to a live piece.
    ///
    /// If an entry with the same identity (source, ability, alignment)
    /// already exists it is merged; otherwise the modifier is appended.
    /// Fires the target's modifier-added hook afterwards.
    pub fn add_modifier(&mut self, target: PieceId, modifier: Modifier) -> Result<(), RulesError> {
        let policy = self.config().stacking;
        let type_id = {
            let piece = self
                .piece_mut(target)
                .ok_or(RulesError::UnknownPiece(target))?;
            let entries = piece.modifiers_mut();
            match entries.iter_mut().find(|m| m.same_identity_as(&modifier)) {
                Some(existing) => {
                    if existing.stackable {
                        existing.strength_delta = cap_delta(
                            existing.strength_delta.saturating_add(modifier.strength_delta),
                            policy,
                        );
                        existing.armor_delta = cap_delta(
                            existing.armor_delta.saturating_add(modifier.armor_delta),
                            policy,
                        );
                    } else {
                        existing.strength_delta = modifier.strength_delta;
                        existing.armor_delta = modifier.armor_delta;
                    }
                    existing.duration = modifier.duration;
                    existing.strength_popup_shown = false;
                    existing.armor_popup_shown = false;
                }
                None => entries.push(modifier),
            }
            piece.type_id()
        };

        log::trace!(
            "modifier {} from {} applied to {target}",
            modifier.ability,
            modifier.source
        );
        self.emit(MatchEvent::ModifierAdded {
            piece: target,
            source: modifier.source,
            ability: modifier.ability,
        });
        self.emit_stats_changed(target);

        behavior(type_id).on_modifier_added(self, target, &modifier);
        Ok(())
    }

    /// Remove the entry matching `modifier`'s identity from a piece.
    ///
    /// If the source piece is still alive its effect-ended hook runs
    /// after the removal, so abilities with lasting effects clean up
    /// exactly once. Removing an absent modifier is a no-op.
    pub fn remove_modifier(&mut self, target: PieceId, modifier: &Modifier) -> Result<(), RulesError> {
        let removed = {
            let piece = self
                .piece_mut(target)
                .ok_or(RulesError::UnknownPiece(target))?;
            let entries = piece.modifiers_mut();
            match entries.iter().position(|m| m.same_identity_as(modifier)) {
                Some(index) => entries.remove(index),
                None => return Ok(()),
            }
        };

        log::trace!(
            "modifier {} from {} removed from {target}",
            removed.ability,
            removed.source
        );
        self.emit(MatchEvent::ModifierRemoved {
            piece: target,
            source: removed.source,
            ability: removed.ability,
        });
        self.emit_stats_changed(target);

        if let Some(source_type) = self.piece(removed.source).map(|p| p.type_id()) {
            behavior(source_type).on_effect_ended(self, removed.source, target, &removed);
        }
        Ok(())
    }

    /// Tick down every non-indefinite modifier on `player`'s pieces.
    /// Called once per completed turn for the owner whose turn ended;
    /// entries reaching zero are removed through [`Self::remove_modifier`].
    pub fn decrement_durations(&mut self, player: PlayerId) {
        let ids: Vec<PieceId> = self.pieces_of(player).map(|p| p.id()).collect();
        for id in ids {
            let mut expired: SmallVec<[Modifier; 4]> = SmallVec::new();
            if let Some(piece) = self.piece_mut(id) {
                for entry in piece.modifiers_mut().iter_mut() {
                    if entry.duration.tick() {
                        expired.push(*entry);
                    }
                }
            }
            for entry in expired {
                // The piece may have been removed by a cascading hook.
                if self.piece(id).is_some() {
                    let _ = self.remove_modifier(id, &entry);
                }
            }
        }
    }

    fn emit_stats_changed(&mut self, target: PieceId) {
        if let Some(piece) = self.piece(target) {
            let event = MatchEvent::StatsChanged {
                piece: target,
                strength: piece.current_strength(),
                armor: piece.current_armor(),
            };
            self.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::{ModifierAlignment, ModifierDuration};
    use crate::pieces::{AbilityTag, PieceRegistry, PieceTypeId};
    use crate::state::MatchConfig;

    fn setup(policy: StackingPolicy) -> (MatchState, PieceId, PieceId) {
        let registry = PieceRegistry::standard();
        let mut state = MatchState::new(MatchConfig {
            stacking: policy,
            ..MatchConfig::default()
        });
        let target = state.spawn_piece(
            registry.get(PieceTypeId::Knight).unwrap(),
            crate::core::PlayerId::ONE,
        );
        let source = state.spawn_piece(
            registry.get(PieceTypeId::Guardian).unwrap(),
            crate::core::PlayerId::ONE,
        );
        (state, target, source)
    }

    fn bulwark(source: PieceId, stackable: bool) -> Modifier {
        Modifier::new(
            source,
            AbilityTag::Bulwark,
            ModifierAlignment::Friendly,
            0,
            2,
            ModifierDuration::Turns(1),
            stackable,
        )
    }

    #[test]
    fn test_equal_stackable_merges_and_sums() {
        let (mut state, target, source) = setup(StackingPolicy::Unbounded);
        state.add_modifier(target, bulwark(source, true)).unwrap();
        state.add_modifier(target, bulwark(source, true)).unwrap();

        let piece = state.piece(target).unwrap();
        assert_eq!(piece.modifiers().len(), 1);
        assert_eq!(piece.modifiers()[0].armor_delta, 4);
        assert_eq!(piece.current_armor(), 6);
    }

    #[test]
    fn test_equal_nonstackable_refreshes() {
        let (mut state, target, source) = setup(StackingPolicy::Unbounded);
        state.add_modifier(target, bulwark(source, false)).unwrap();
        let mut again = bulwark(source, false);
        again.duration = ModifierDuration::Turns(3);
        state.add_modifier(target, again).unwrap();

        let piece = state.piece(target).unwrap();
        assert_eq!(piece.modifiers().len(), 1);
        assert_eq!(piece.modifiers()[0].armor_delta, 2);
        assert_eq!(piece.modifiers()[0].duration, ModifierDuration::Turns(3));
    }

    #[test]
    fn test_stacking_cap() {
        let (mut state, target, source) = setup(StackingPolicy::Cap(3));
        for _ in 0..5 {
            state.add_modifier(target, bulwark(source, true)).unwrap();
        }
        assert_eq!(state.piece(target).unwrap().modifiers()[0].armor_delta, 3);
    }

    #[test]
    fn test_different_sources_do_not_merge() {
        let (mut state, target, source) = setup(StackingPolicy::Unbounded);
        let registry = PieceRegistry::standard();
        let other = state.spawn_piece(
            registry.get(PieceTypeId::Guardian).unwrap(),
            crate::core::PlayerId::ONE,
        );
        state.add_modifier(target, bulwark(source, true)).unwrap();
        state.add_modifier(target, bulwark(other, true)).unwrap();
        assert_eq!(state.piece(target).unwrap().modifiers().len(), 2);
    }

    #[test]
    fn test_decrement_removes_exactly_at_zero() {
        let (mut state, target, source) = setup(StackingPolicy::Unbounded);
        let mut modifier = bulwark(source, false);
        modifier.duration = ModifierDuration::Turns(2);
        state.add_modifier(target, modifier).unwrap();

        state.decrement_durations(crate::core::PlayerId::ONE);
        assert_eq!(state.piece(target).unwrap().modifiers().len(), 1);
        state.decrement_durations(crate::core::PlayerId::ONE);
        assert_eq!(state.piece(target).unwrap().modifiers().len(), 0);
    }

    #[test]
    fn test_indefinite_never_expires() {
        let (mut state, target, source) = setup(StackingPolicy::Unbounded);
        let mut modifier = bulwark(source, false);
        modifier.duration = ModifierDuration::Indefinite;
        state.add_modifier(target, modifier).unwrap();

        for _ in 0..20 {
            state.decrement_durations(crate::core::PlayerId::ONE);
        }
        assert_eq!(state.piece(target).unwrap().modifiers().len(), 1);
    }

    #[test]
    fn test_decrement_only_touches_owners_pieces() {
        let (mut state, target, source) = setup(StackingPolicy::Unbounded);
        state.add_modifier(target, bulwark(source, false)).unwrap();

        state.decrement_durations(crate::core::PlayerId::TWO);
        assert_eq!(
            state.piece(target).unwrap().modifiers()[0].duration,
            ModifierDuration::Turns(1)
        );
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut state, target, source) = setup(StackingPolicy::Unbounded);
        let modifier = bulwark(source, false);
        state.remove_modifier(target, &modifier).unwrap();
        assert!(state.events().is_empty());
    }
}
