//! Live piece instances.
//!
//! A `Piece` is one unit on the board: its definition reference, owner,
//! base stats, ability bookkeeping and active modifiers. Base strength
//! and armor clamp to the stat range on every write; current stats are
//! computed from base plus modifier deltas and clamped again on read.
//! Cooldowns floor at zero. These accessors are the only mutation paths
//! for piece stats.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::TileCoords;
use crate::core::{PieceId, PlayerId};
use crate::modifiers::Modifier;

use super::definition::{AbilityUses, PieceDefinition, PieceTypeId};

/// Lowest legal value for strength and armor.
pub const STAT_MIN: i8 = 0;
/// Highest legal value for strength and armor.
pub const STAT_MAX: i8 = 20;

fn clamp_stat(value: i8) -> i8 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// One live unit on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    type_id: PieceTypeId,
    owner: PlayerId,
    base_strength: i8,
    base_armor: i8,
    active_cooldown: u8,
    active_uses: AbilityUses,
    passive_cooldown: u8,
    passive_uses: AbilityUses,
    tile: Option<TileCoords>,
    modifiers: SmallVec<[Modifier; 4]>,
}

impl Piece {
    /// Create a piece from its definition. The piece starts off-board;
    /// placement assigns its tile.
    #[must_use]
    pub fn from_definition(id: PieceId, definition: &PieceDefinition, owner: PlayerId) -> Self {
        Self {
            id,
            type_id: definition.type_id,
            owner,
            base_strength: clamp_stat(definition.base_strength),
            base_armor: clamp_stat(definition.base_armor),
            active_cooldown: 0,
            active_uses: definition
                .active
                .map_or(AbilityUses::Limited(0), |a| a.uses),
            passive_cooldown: 0,
            passive_uses: definition
                .passive
                .map_or(AbilityUses::Limited(0), |p| p.uses),
            tile: None,
            modifiers: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn type_id(&self) -> PieceTypeId {
        self.type_id
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// The tile this piece stands on. `None` only before placement.
    #[must_use]
    pub fn tile(&self) -> Option<TileCoords> {
        self.tile
    }

    pub(crate) fn set_tile(&mut self, tile: Option<TileCoords>) {
        self.tile = tile;
    }

    #[must_use]
    pub fn base_strength(&self) -> i8 {
        self.base_strength
    }

    #[must_use]
    pub fn base_armor(&self) -> i8 {
        self.base_armor
    }

    pub fn set_base_strength(&mut self, value: i8) {
        self.base_strength = clamp_stat(value);
    }

    pub fn set_base_armor(&mut self, value: i8) {
        self.base_armor = clamp_stat(value);
    }

    /// Base strength plus active modifier deltas, clamped.
    #[must_use]
    pub fn current_strength(&self) -> i8 {
        let delta: i16 = self
            .modifiers
            .iter()
            .map(|m| i16::from(m.strength_delta))
            .sum();
        clamp_wide(i16::from(self.base_strength) + delta)
    }

    /// Base armor plus active modifier deltas, clamped.
    #[must_use]
    pub fn current_armor(&self) -> i8 {
        let delta: i16 = self
            .modifiers
            .iter()
            .map(|m| i16::from(m.armor_delta))
            .sum();
        clamp_wide(i16::from(self.base_armor) + delta)
    }

    #[must_use]
    pub fn active_cooldown(&self) -> u8 {
        self.active_cooldown
    }

    #[must_use]
    pub fn active_uses(&self) -> AbilityUses {
        self.active_uses
    }

    #[must_use]
    pub fn passive_cooldown(&self) -> u8 {
        self.passive_cooldown
    }

    #[must_use]
    pub fn passive_uses(&self) -> AbilityUses {
        self.passive_uses
    }

    /// Whether the active ability passes its cooldown and use gates.
    #[must_use]
    pub fn active_ability_ready(&self) -> bool {
        self.active_cooldown == 0 && self.active_uses.available()
    }

    /// Whether the passive passes its cooldown and use gates. Always
    /// false for pieces whose definition has no passive.
    #[must_use]
    pub fn passive_ability_ready(&self) -> bool {
        self.passive_cooldown == 0 && self.passive_uses.available()
    }

    /// Spend one activation: decrement uses, start the cooldown.
    pub(crate) fn spend_active(&mut self, base_cooldown: u8) {
        self.active_uses.spend();
        self.active_cooldown = base_cooldown;
    }

    /// Spend one passive trigger.
    pub(crate) fn spend_passive(&mut self, base_cooldown: u8) {
        self.passive_uses.spend();
        self.passive_cooldown = base_cooldown;
    }

    /// Tick both cooldowns down one turn, flooring at zero.
    pub(crate) fn tick_cooldowns(&mut self) {
        self.active_cooldown = self.active_cooldown.saturating_sub(1);
        self.passive_cooldown = self.passive_cooldown.saturating_sub(1);
    }

    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut SmallVec<[Modifier; 4]> {
        &mut self.modifiers
    }
}

fn clamp_wide(value: i16) -> i8 {
    value.clamp(i16::from(STAT_MIN), i16::from(STAT_MAX)) as i8
}
