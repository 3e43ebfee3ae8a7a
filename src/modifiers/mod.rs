//! Modifier types and the engine operations that manage them.
//!
//! The operations themselves (`add_modifier`, `remove_modifier`,
//! `decrement_durations`) are `MatchState` methods in [`engine`] since
//! they touch the piece arena and fire behavior hooks.

mod engine;
mod modifier;

pub use modifier::{Modifier, ModifierAlignment, ModifierDuration};
