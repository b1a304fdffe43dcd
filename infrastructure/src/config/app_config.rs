//! Raw configuration data
//!
//! One flat table whose keys match the environment variable names in lower
//! case, so `API_KEY=...` in the environment and `api_key = "..."` in a TOML
//! file set the same field.

use super::error::ConfigError;
use persona_domain::{DEFAULT_TEMPERATURE, validate_temperature};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHARACTER_PROFILE_PATH: &str = "config/character.yaml";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

const REDACTED: &str = "********";

/// Effective configuration after all sources are merged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub api_base_url: String,
    /// Bearer token; required to talk to the model
    pub api_key: Option<String>,
    /// Model identifier; required to talk to the model
    pub model_id: Option<String>,
    /// YAML file describing the character
    pub character_profile_path: PathBuf,
    pub temperature: f32,
    pub request_timeout_secs: u64,
    /// Text-to-speech program, e.g. `espeak` or `say -v Kyoko`
    pub tts_command: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            model_id: None,
            character_profile_path: PathBuf::from(DEFAULT_CHARACTER_PROFILE_PATH),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            tts_command: None,
        }
    }
}

impl AppConfig {
    /// Check values that deserialize fine but make no sense.
    ///
    /// Missing credentials are not checked here; `--show-config` must work
    /// without them. See `CompletionSettings::from_config`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "API_BASE_URL",
                reason: "cannot be empty".to_string(),
            });
        }
        validate_temperature(self.temperature).map_err(|e| ConfigError::InvalidValue {
            key: "TEMPERATURE",
            reason: e.to_string(),
        })?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_SECS",
                reason: "cannot be 0".to_string(),
            });
        }
        Ok(())
    }

    /// TTS command, if one is configured and not blank
    pub fn tts_command(&self) -> Option<&str> {
        self.tts_command
            .as_deref()
            .map(str::trim)
            .filter(|cmd| !cmd.is_empty())
    }

    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| REDACTED.to_string()),
            ..self.clone()
        }
    }

    /// Render as TOML with secrets masked
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.redacted())?)
    }
}
