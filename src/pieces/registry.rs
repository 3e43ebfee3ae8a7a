//! The piece definition table.
//!
//! Loaded once per process and consumed read-only; piece instances refer
//! back to it by [`PieceTypeId`].

use rustc_hash::FxHashMap;

use super::definition::{
    AbilityProfile, AbilityTag, AbilityUses, PieceClass, PieceDefinition, PieceRarity, PieceTypeId,
};

/// Read-only table of piece definitions keyed by type id.
#[derive(Clone, Debug, Default)]
pub struct PieceRegistry {
    definitions: FxHashMap<PieceTypeId, PieceDefinition>,
}

impl PieceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard definition set.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in standard_definitions() {
            registry.register(def);
        }
        registry
    }

    /// Register a definition, replacing any previous entry for its type.
    pub fn register(&mut self, definition: PieceDefinition) {
        self.definitions.insert(definition.type_id, definition);
    }

    /// Look up a definition by type id.
    #[must_use]
    pub fn get(&self, type_id: PieceTypeId) -> Option<&PieceDefinition> {
        self.definitions.get(&type_id)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over all registered definitions.
    pub fn iter(&self) -> impl Iterator<Item = &PieceDefinition> {
        self.definitions.values()
    }
}

fn passive(tag: AbilityTag) -> Option<AbilityProfile> {
    // Passives fire automatically; no cooldown or use limit applies.
    Some(AbilityProfile {
        tag,
        base_cooldown: 0,
        uses: AbilityUses::Unlimited,
        targets_tiles: false,
    })
}

fn active(tag: AbilityTag, cooldown: u8, uses: u8, targets_tiles: bool) -> Option<AbilityProfile> {
    Some(AbilityProfile {
        tag,
        base_cooldown: cooldown,
        uses: AbilityUses::Limited(uses),
        targets_tiles,
    })
}

fn standard_definitions() -> Vec<PieceDefinition> {
    use PieceClass::*;
    use PieceRarity::*;
    use PieceTypeId::*;

    vec![
        PieceDefinition {
            type_id: Recruit,
            name: "Recruit",
            class: Soldier,
            rarity: Basic,
            base_strength: 1,
            base_armor: 1,
            passive: passive(AbilityTag::Phalanx),
            active: None,
        },
        PieceDefinition {
            type_id: AcademyRecruit,
            name: "Academy Recruit",
            class: Soldier,
            rarity: Superior,
            base_strength: 2,
            base_armor: 2,
            passive: None,
            active: None,
        },
        PieceDefinition {
            type_id: Knight,
            name: "Knight",
            class: Soldier,
            rarity: Superior,
            base_strength: 3,
            base_armor: 2,
            passive: None,
            active: active(AbilityTag::Dash, 2, 2, true),
        },
        PieceDefinition {
            type_id: WarMage,
            name: "War Mage",
            class: Soldier,
            rarity: Heroic,
            base_strength: 4,
            base_armor: 3,
            passive: passive(AbilityTag::BattleRhythm),
            active: None,
        },
        PieceDefinition {
            type_id: Guardian,
            name: "Guardian",
            class: Paladin,
            rarity: Superior,
            base_strength: 1,
            base_armor: 4,
            passive: None,
            active: active(AbilityTag::Bulwark, 1, 3, false),
        },
        PieceDefinition {
            type_id: Captain,
            name: "Captain",
            class: Paladin,
            rarity: Heroic,
            base_strength: 3,
            base_armor: 4,
            passive: passive(AbilityTag::Inspire),
            active: None,
        },
        PieceDefinition {
            type_id: Assassin,
            name: "Assassin",
            class: Rogue,
            rarity: Heroic,
            base_strength: 5,
            base_armor: 1,
            passive: None,
            active: active(AbilityTag::Backstab, 2, 2, false),
        },
        PieceDefinition {
            type_id: Pyromancer,
            name: "Pyromancer",
            class: Mage,
            rarity: Heroic,
            base_strength: 4,
            base_armor: 2,
            passive: None,
            active: active(AbilityTag::Fireball, 2, 3, false),
        },
        PieceDefinition {
            type_id: Cryomancer,
            name: "Cryomancer",
            class: Mage,
            rarity: Superior,
            base_strength: 2,
            base_armor: 3,
            passive: None,
            active: active(AbilityTag::Freeze, 1, 3, false),
        },
        PieceDefinition {
            type_id: King,
            name: "King",
            class: Commander,
            rarity: Champion,
            base_strength: 3,
            base_armor: 3,
            passive: None,
            active: active(AbilityTag::Rally, 3, 1, false),
        },
    ]
}
