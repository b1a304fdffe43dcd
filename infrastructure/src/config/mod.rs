//! Configuration loading for persona-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`API_KEY`, `MODEL_ID`, ...), `.env` included
//! 2. `--config <path>` specified file
//! 3. Project root: `./persona-chat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/persona-chat/config.toml`
//! 5. Default values

mod app_config;
mod error;
mod loader;

pub use app_config::{
    AppConfig, DEFAULT_API_BASE_URL, DEFAULT_CHARACTER_PROFILE_PATH,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_KEYS};
