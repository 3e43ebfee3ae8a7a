//! War Mage: heavy soldier that echoes buffs cast on it.
//!
//! Battle Rhythm: whenever another piece's modifier raises one of the
//! war mage's stats, it grants itself +1 to each boosted stat for one
//! turn less than the triggering modifier's duration.

use crate::board::StepOffset;
use crate::core::PieceId;
use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
use crate::pieces::behavior::PieceBehavior;
use crate::pieces::AbilityTag;
use crate::state::MatchState;

pub struct WarMage;

impl PieceBehavior for WarMage {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        (offset.right == 0 && offset.forward.abs() == 1)
            || (offset.forward == 0 && (1..=3).contains(&offset.right.abs()))
    }

    fn on_modifier_added(&self, state: &mut MatchState, piece: PieceId, modifier: &Modifier) {
        // The echo never re-triggers off its own modifiers.
        if modifier.source == piece || !modifier.is_buff() {
            return;
        }
        let duration = match modifier.duration {
            ModifierDuration::Turns(n) if n > 1 => ModifierDuration::Turns(n - 1),
            _ => return,
        };

        let echo = Modifier::new(
            piece,
            AbilityTag::BattleRhythm,
            ModifierAlignment::Friendly,
            i8::from(modifier.strength_delta > 0),
            i8::from(modifier.armor_delta > 0),
            duration,
            false,
        );
        let _ = state.add_modifier(piece, echo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileCoords;
    use crate::core::PlayerId;
    use crate::pieces::{PieceRegistry, PieceTypeId};

    fn setup() -> (MatchState, PieceId, PieceId) {
        let registry = PieceRegistry::standard();
        let mut state = MatchState::default();
        let mage = state.spawn_piece(registry.get(PieceTypeId::WarMage).unwrap(), PlayerId::ONE);
        let source = state.spawn_piece(registry.get(PieceTypeId::King).unwrap(), PlayerId::ONE);
        state.set_occupant(TileCoords::new(3, 3), Some(mage)).unwrap();
        state.set_occupant(TileCoords::new(3, 0), Some(source)).unwrap();
        (state, mage, source)
    }

    fn buff(source: PieceId, strength: i8, armor: i8, turns: u8) -> Modifier {
        Modifier::new(
            source,
            AbilityTag::Rally,
            ModifierAlignment::Friendly,
            strength,
            armor,
            ModifierDuration::Turns(turns),
            false,
        )
    }

    #[test]
    fn test_echo_tracks_boosted_stats() {
        let (mut state, mage, source) = setup();
        state.add_modifier(mage, buff(source, 2, 0, 3)).unwrap();

        let mods = state.piece(mage).unwrap().modifiers();
        assert_eq!(mods.len(), 2);
        let echo = mods.iter().find(|m| m.ability == AbilityTag::BattleRhythm).unwrap();
        assert_eq!((echo.strength_delta, echo.armor_delta), (1, 0));
        assert_eq!(echo.duration, ModifierDuration::Turns(2));
        // 4 base + 2 buff + 1 echo.
        assert_eq!(state.piece(mage).unwrap().current_strength(), 7);
    }

    #[test]
    fn test_single_turn_buff_leaves_no_echo() {
        let (mut state, mage, source) = setup();
        state.add_modifier(mage, buff(source, 0, 2, 1)).unwrap();
        assert_eq!(state.piece(mage).unwrap().modifiers().len(), 1);
    }

    #[test]
    fn test_debuff_does_not_trigger() {
        let (mut state, mage, source) = setup();
        state.add_modifier(mage, buff(source, -2, -1, 3)).unwrap();
        assert_eq!(state.piece(mage).unwrap().modifiers().len(), 1);
    }
}
