//! The command boundary and authority engine.

mod command;
mod engine;

pub use command::{Command, CommandReply};
pub use engine::Authority;
