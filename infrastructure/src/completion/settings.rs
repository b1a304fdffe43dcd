//! Endpoint credentials for the completion client

use crate::config::{AppConfig, ConfigError};
use std::fmt;
use std::time::Duration;

/// Where and as whom to send completion requests. Resolved once at startup.
#[derive(Clone, PartialEq)]
pub struct CompletionSettings {
    pub base_url: String,
    pub api_key: String,
    pub model_id: String,
    pub timeout: Duration,
}

impl CompletionSettings {
    /// Take the endpoint settings out of the merged configuration.
    ///
    /// Fails if `API_KEY` or `MODEL_ID` is missing or blank.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
            api_key: required(config.api_key.as_deref(), "API_KEY")?,
            model_id: required(config.model_id.as_deref(), "MODEL_ID")?,
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn required(value: Option<&str>, key: &'static str) -> Result<String, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingKey(key))
}

// Keep the key out of logs and panics
impl fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"********")
            .field("model_id", &self.model_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, model_id: Option<&str>) -> AppConfig {
        AppConfig {
            api_key: api_key.map(String::from),
            model_id: model_id.map(String::from),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_from_config() {
        let settings = CompletionSettings::from_config(&config(Some("sk"), Some("m"))).unwrap();
        assert_eq!(settings.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.api_key, "sk");
        assert_eq!(settings.model_id, "m");
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert_eq!(
            settings.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_missing_credentials() {
        assert!(matches!(
            CompletionSettings::from_config(&config(None, Some("m"))),
            Err(ConfigError::MissingKey("API_KEY"))
        ));
        assert!(matches!(
            CompletionSettings::from_config(&config(Some("sk"), Some("   "))),
            Err(ConfigError::MissingKey("MODEL_ID"))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let mut cfg = config(Some("sk"), Some("m"));
        cfg.api_base_url = "http://localhost:8080/v1/".to_string();
        let settings = CompletionSettings::from_config(&cfg).unwrap();
        assert_eq!(
            settings.chat_completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let settings =
            CompletionSettings::from_config(&config(Some("sk-secret"), Some("m"))).unwrap();
        assert!(!format!("{settings:?}").contains("sk-secret"));
    }
}
