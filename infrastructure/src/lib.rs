//! Infrastructure layer for persona-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration and profile loading.

pub mod completion;
pub mod config;
pub mod persona;
pub mod speech;

// Re-export commonly used types
pub use completion::{CompletionSettings, OpenAiCompletionClient};
pub use config::{AppConfig, ConfigError, ConfigLoader};
pub use persona::PersonaLoader;
pub use speech::{CommandSpeechSink, LogSpeechSink};
