//! Piece definitions, instances and per-type behavior.
//!
//! ## Structure
//!
//! - [`definition`]: the static data table of each piece type's name,
//!   class, stats and ability profiles.
//! - [`registry`]: the lookup table consumed read-only by the engine.
//! - [`instance`]: live pieces with clamped stats and ability
//!   bookkeeping.
//! - [`behavior`]: the per-type trait (movement, targeting, effects)
//!   and its lookup table.
//! - [`movement`]: move-tile enumeration over pattern and path.
//! - [`types`]: one module per piece type.

pub mod behavior;
mod definition;
mod instance;
pub mod movement;
mod registry;
pub mod types;

pub use definition::{
    AbilityProfile, AbilityTag, AbilityUses, PieceClass, PieceDefinition, PieceRarity, PieceTypeId,
};
pub use instance::{Piece, STAT_MAX, STAT_MIN};
pub use registry::PieceRegistry;
