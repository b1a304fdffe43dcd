//! Interactive chat module
//!
//! Provides the line-based terminal chat surface and one-shot mode.

mod command;
mod surface;

pub use command::SlashCommand;
pub use surface::{ChatSurface, OneShotError};
