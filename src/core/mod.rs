//! Core identifiers, per-player storage, and the command error taxonomy.

mod entity;
mod error;
mod player;

pub use entity::PieceId;
pub use error::RulesError;
pub use player::{PerPlayer, PlayerId};
