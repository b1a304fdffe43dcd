//! Startup configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops the app from starting with a usable setup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("{0} is not set")]
    MissingKey(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Character profile not found: {}", .0.display())]
    PersonaNotFound(PathBuf),

    #[error("Invalid character profile {origin}: {reason}")]
    InvalidPersona { origin: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}
