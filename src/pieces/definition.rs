//! Static piece definitions.
//!
//! Every piece instance references one [`PieceDefinition`] by
//! [`PieceTypeId`]. Definitions are immutable data: display name, class,
//! rarity, base stats and the cooldown/use profiles of the type's
//! passive and active abilities. Behavior (movement patterns, ability
//! effects) lives in [`crate::pieces::behavior`].

use serde::{Deserialize, Serialize};

/// Identifies one of the closed set of piece types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceTypeId {
    Recruit,
    AcademyRecruit,
    Knight,
    WarMage,
    Guardian,
    Captain,
    Assassin,
    Pyromancer,
    Cryomancer,
    King,
}

impl PieceTypeId {
    /// All piece types, in definition order.
    pub const ALL: [PieceTypeId; 10] = [
        PieceTypeId::Recruit,
        PieceTypeId::AcademyRecruit,
        PieceTypeId::Knight,
        PieceTypeId::WarMage,
        PieceTypeId::Guardian,
        PieceTypeId::Captain,
        PieceTypeId::Assassin,
        PieceTypeId::Pyromancer,
        PieceTypeId::Cryomancer,
        PieceTypeId::King,
    ];
}

impl std::fmt::Display for PieceTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Piece class. Commander-class pieces end the match when they die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceClass {
    Soldier,
    Paladin,
    Rogue,
    Mage,
    Commander,
}

/// Rarity tier, used by army building and presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceRarity {
    Basic,
    Superior,
    Heroic,
    Champion,
}

/// Names an ability for modifier identity and event reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTag {
    Phalanx,
    Dash,
    BattleRhythm,
    Bulwark,
    Inspire,
    Backstab,
    Fireball,
    Freeze,
    Rally,
}

impl std::fmt::Display for AbilityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AbilityTag::Phalanx => "Phalanx",
            AbilityTag::Dash => "Dash",
            AbilityTag::BattleRhythm => "Battle Rhythm",
            AbilityTag::Bulwark => "Bulwark",
            AbilityTag::Inspire => "Inspire",
            AbilityTag::Backstab => "Backstab",
            AbilityTag::Fireball => "Fireball",
            AbilityTag::Freeze => "Freeze",
            AbilityTag::Rally => "Rally",
        };
        f.write_str(name)
    }
}

/// How many activations an ability has left over the whole match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityUses {
    Unlimited,
    Limited(u8),
}

impl AbilityUses {
    /// Whether at least one use remains.
    #[must_use]
    pub fn available(self) -> bool {
        match self {
            AbilityUses::Unlimited => true,
            AbilityUses::Limited(n) => n > 0,
        }
    }

    /// Consume one use. Limited counts floor at zero.
    pub fn spend(&mut self) {
        if let AbilityUses::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

/// Cooldown/use profile of one ability slot on a definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityProfile {
    pub tag: AbilityTag,
    /// Turns between activations. Zero for always-on passives.
    pub base_cooldown: u8,
    pub uses: AbilityUses,
    /// Targets are presented as tiles rather than pieces.
    pub targets_tiles: bool,
}

/// Immutable definition of one piece type. Definitions are static data
/// and are referenced from snapshots by [`PieceTypeId`] only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PieceDefinition {
    pub type_id: PieceTypeId,
    pub name: &'static str,
    pub class: PieceClass,
    pub rarity: PieceRarity,
    pub base_strength: i8,
    pub base_armor: i8,
    pub passive: Option<AbilityProfile>,
    pub active: Option<AbilityProfile>,
}

impl PieceDefinition {
    /// Whether this piece's death ends the match.
    #[must_use]
    pub fn is_commander(&self) -> bool {
        self.class == PieceClass::Commander
    }
}
