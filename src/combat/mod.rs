//! Combat resolution.
//!
//! Classification is pure: given both sides' current stats it decides
//! who dies, without touching state. The attacker kills the defender
//! iff attacker strength >= defender armor; the defender kills back
//! iff its strength >= attacker armor, evaluated only when the defender
//! is allowed to fight. Ranged ability attacks are one-sided.
//!
//! `MatchState::resolve_attack` applies a classified outcome: deaths,
//! the optional relocation of a surviving attacker onto the defender's
//! tile, and the combat event.

use serde::{Deserialize, Serialize};

use crate::core::{PieceId, RulesError};
use crate::events::MatchEvent;
use crate::state::MatchState;

/// The stats combat reads from each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub strength: i8,
    pub armor: i8,
}

impl CombatStats {
    #[must_use]
    pub const fn new(strength: i8, armor: i8) -> Self {
        Self { strength, armor }
    }
}

/// Result of one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Neither side's strength reached the other's armor.
    BothSurvive,
    /// Only the defender's counter landed.
    AttackerDies,
    /// Only the attacker's hit landed.
    DefenderDies,
    /// Both hits landed.
    MutualDeath,
    /// One-sided hit that failed to kill. The attacker was never at risk.
    DefenderSurvives,
}

/// Classify an attack without mutating anything. Usable by preview UI.
#[must_use]
pub fn classify(attacker: CombatStats, defender: CombatStats, defender_fights: bool) -> AttackOutcome {
    let defender_dies = attacker.strength >= defender.armor;
    if !defender_fights {
        return if defender_dies {
            AttackOutcome::DefenderDies
        } else {
            AttackOutcome::DefenderSurvives
        };
    }
    let attacker_dies = defender.strength >= attacker.armor;
    match (attacker_dies, defender_dies) {
        (false, false) => AttackOutcome::BothSurvive,
        (true, false) => AttackOutcome::AttackerDies,
        (false, true) => AttackOutcome::DefenderDies,
        (true, true) => AttackOutcome::MutualDeath,
    }
}

impl MatchState {
    /// Resolve an attack between two live pieces. When `relocate` is set
    /// and only the defender dies, the attacker takes the defender's
    /// tile. `defender_fights` is false for ranged ability attacks.
    pub(crate) fn resolve_attack(
        &mut self,
        attacker: PieceId,
        defender: PieceId,
        relocate: bool,
        defender_fights: bool,
    ) -> Result<AttackOutcome, RulesError> {
        let attacker_stats = self.combat_stats(attacker)?;
        let defender_stats = self.combat_stats(defender)?;
        let defender_tile = self
            .piece(defender)
            .and_then(|p| p.tile())
            .ok_or(RulesError::UnknownPiece(defender))?;

        let outcome = classify(attacker_stats, defender_stats, defender_fights);

        if matches!(outcome, AttackOutcome::DefenderDies | AttackOutcome::MutualDeath) {
            self.kill_piece(defender)?;
        }
        if matches!(outcome, AttackOutcome::AttackerDies | AttackOutcome::MutualDeath) {
            self.kill_piece(attacker)?;
        }
        if outcome == AttackOutcome::DefenderDies && relocate {
            self.set_occupant(defender_tile, Some(attacker))?;
        }

        self.emit(MatchEvent::CombatResolved {
            attacker,
            defender,
            outcome,
        });
        self.refresh_auras();
        Ok(outcome)
    }

    /// Current combat stats of a live piece.
    pub fn combat_stats(&self, piece: PieceId) -> Result<CombatStats, RulesError> {
        let piece = self.piece(piece).ok_or(RulesError::UnknownPiece(piece))?;
        Ok(CombatStats::new(piece.current_strength(), piece.current_armor()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_survive() {
        let outcome = classify(CombatStats::new(5, 3), CombatStats::new(2, 6), true);
        assert_eq!(outcome, AttackOutcome::BothSurvive);
    }

    #[test]
    fn test_defender_dies() {
        let outcome = classify(CombatStats::new(6, 3), CombatStats::new(2, 4), true);
        assert_eq!(outcome, AttackOutcome::DefenderDies);
    }

    #[test]
    fn test_attacker_dies() {
        let outcome = classify(CombatStats::new(1, 2), CombatStats::new(4, 5), true);
        assert_eq!(outcome, AttackOutcome::AttackerDies);
    }

    #[test]
    fn test_mutual_death() {
        let outcome = classify(CombatStats::new(4, 2), CombatStats::new(3, 3), true);
        assert_eq!(outcome, AttackOutcome::MutualDeath);
    }

    #[test]
    fn test_one_sided_attack_never_kills_attacker() {
        // Defender would win the exchange, but never gets to swing.
        let outcome = classify(CombatStats::new(1, 1), CombatStats::new(9, 5), false);
        assert_eq!(outcome, AttackOutcome::DefenderSurvives);

        let outcome = classify(CombatStats::new(5, 1), CombatStats::new(9, 4), false);
        assert_eq!(outcome, AttackOutcome::DefenderDies);
    }

    #[test]
    fn test_equal_strength_and_armor_kills() {
        let outcome = classify(CombatStats::new(3, 9), CombatStats::new(1, 3), false);
        assert_eq!(outcome, AttackOutcome::DefenderDies);
    }
}
