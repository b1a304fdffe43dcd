//! Presentation layer for persona-chat
//!
//! This crate contains the CLI definition, output formatting,
//! the reply spinner, and the interactive chat surface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatSurface, OneShotError, SlashCommand};
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ReplyIndicator;
