//! Temporary stat modifiers.
//!
//! A modifier adjusts a piece's strength and/or armor for a number of
//! turns. Modifiers keep their own identity: two modifiers are the same
//! logical modifier when they share source piece, source ability and
//! alignment, and re-applying an equal modifier merges into the existing
//! entry instead of appending a second one. Deltas are never baked into
//! base stats; current stats are recomputed from base plus active deltas
//! on every read.

use serde::{Deserialize, Serialize};

use crate::core::PieceId;
use crate::pieces::AbilityTag;

/// Whether the modifier's source was friendly or hostile to the
/// modified piece's owner at application time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierAlignment {
    Friendly,
    Hostile,
}

/// Remaining lifetime of a modifier, in the owner's turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierDuration {
    /// Never expires on its own; removed only explicitly.
    Indefinite,
    /// Expires after this many of the target owner's turn ends.
    Turns(u8),
}

impl ModifierDuration {
    /// Tick down one turn. Returns true when the modifier has expired.
    pub fn tick(&mut self) -> bool {
        match self {
            ModifierDuration::Indefinite => false,
            ModifierDuration::Turns(n) => {
                *n = n.saturating_sub(1);
                *n == 0
            }
        }
    }
}

/// A temporary adjustment to one piece's strength and/or armor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    /// Piece whose ability created this modifier.
    pub source: PieceId,
    /// Ability that created this modifier.
    pub ability: AbilityTag,
    pub alignment: ModifierAlignment,
    pub strength_delta: i8,
    pub armor_delta: i8,
    pub duration: ModifierDuration,
    /// Merging an equal modifier sums deltas when set; otherwise the
    /// existing deltas are replaced.
    pub stackable: bool,
    /// Presentation bookkeeping: the stat popup was already shown.
    pub strength_popup_shown: bool,
    pub armor_popup_shown: bool,
}

impl Modifier {
    /// Create a modifier with unshown popups.
    #[must_use]
    pub fn new(
        source: PieceId,
        ability: AbilityTag,
        alignment: ModifierAlignment,
        strength_delta: i8,
        armor_delta: i8,
        duration: ModifierDuration,
        stackable: bool,
    ) -> Self {
        Self {
            source,
            ability,
            alignment,
            strength_delta,
            armor_delta,
            duration,
            stackable,
            strength_popup_shown: false,
            armor_popup_shown: false,
        }
    }

    /// Logical identity: same source piece, ability and alignment.
    #[must_use]
    pub fn same_identity_as(&self, other: &Modifier) -> bool {
        self.source == other.source
            && self.ability == other.ability
            && self.alignment == other.alignment
    }

    /// Whether either delta raises a stat.
    #[must_use]
    pub fn is_buff(&self) -> bool {
        self.strength_delta > 0 || self.armor_delta > 0
    }
}
