//! # skirmish
//!
//! The rules engine of a two-player, grid-based tactics game: board
//! occupancy, per-type movement and targeting, temporary stat
//! modifiers, combat resolution and the turn/match state machine, all
//! behind a single-authority command boundary.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: All mutation flows through [`rules::Authority`],
//!    which validates each command against turn state and commits it
//!    atomically or not at all.
//!
//! 2. **Closed Piece Set**: Piece types are an enum plus one
//!    `PieceBehavior` implementation each, selected through a lookup
//!    table. No inheritance chains.
//!
//! 3. **Computed Stats**: Modifiers are never baked into base values;
//!    current strength and armor are recomputed from base plus active
//!    deltas, clamped to the stat range, on every read.
//!
//! 4. **Persistent Data Structures**: O(1) cloning via `im` keeps the
//!    clone-validate-commit cycle and client-side predicted projections
//!    cheap.
//!
//! ## Modules
//!
//! - `core`: Piece and player handles, per-player storage, errors
//! - `board`: Tile coordinates, occupancy, path queries
//! - `pieces`: Definitions, registry, instances, per-type behavior
//! - `modifiers`: Temporary stat modifiers and their engine
//! - `abilities`: Two-step targeting and ability dispatch
//! - `combat`: Outcome classification and attack resolution
//! - `events`: The state-change journal consumed by presentation
//! - `state`: The authoritative `MatchState`
//! - `rules`: The command boundary and authority engine
//! - `army`: Army presets resolved at setup

pub mod abilities;
pub mod army;
pub mod board;
pub mod combat;
pub mod core;
pub mod events;
pub mod modifiers;
pub mod pieces;
pub mod rules;
pub mod state;

// Re-export commonly used types
pub use crate::core::{PerPlayer, PieceId, PlayerId, RulesError};

pub use crate::abilities::{TargetCache, TargetList, TargetRef};
pub use crate::army::ArmyPreset;
pub use crate::board::{Board, BoardConfig, StepOffset, TileCoords};
pub use crate::combat::{classify, AttackOutcome, CombatStats};
pub use crate::events::MatchEvent;
pub use crate::modifiers::{Modifier, ModifierAlignment, ModifierDuration};
pub use crate::pieces::{
    AbilityProfile, AbilityTag, AbilityUses, Piece, PieceClass, PieceDefinition, PieceRarity,
    PieceRegistry, PieceTypeId,
};
pub use crate::rules::{Authority, Command, CommandReply};
pub use crate::state::{
    MatchConfig, MatchState, MatchStatus, PlayerSlot, PlayerStatus, StackingPolicy,
};
