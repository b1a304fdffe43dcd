//! Character profile loading
//!
//! Profiles are YAML mappings:
//!
//! ```yaml
//! name: Kiki
//! universe: Kiki's Delivery Service
//! personality:
//!   - cheerful
//!   - stubborn
//! response_rules:        # optional
//!   - Keep replies short
//! greeting: Hello there! # optional
//! ```

use crate::config::ConfigError;
use figment::{
    Figment,
    providers::{Format, Yaml},
};
use persona_domain::Persona;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Profile as it appears on disk
#[derive(Debug, Deserialize)]
struct PersonaFile {
    name: String,
    universe: String,
    personality: Vec<String>,
    #[serde(default)]
    response_rules: Vec<String>,
    #[serde(default)]
    greeting: Option<String>,
}

/// Reads and validates character profiles
pub struct PersonaLoader;

impl PersonaLoader {
    /// Load a profile from a YAML file.
    pub fn load(path: &Path) -> Result<Persona, ConfigError> {
        // figment treats a missing file as empty, which would surface as a
        // confusing "missing field" error
        if !path.is_file() {
            return Err(ConfigError::PersonaNotFound(path.to_path_buf()));
        }

        let persona = Self::extract(
            Figment::from(Yaml::file_exact(path)),
            &path.display().to_string(),
        )?;
        debug!(
            "Loaded character '{}' from {}",
            persona.name(),
            path.display()
        );
        Ok(persona)
    }

    /// Parse a profile from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Persona, ConfigError> {
        Self::extract(Figment::from(Yaml::string(yaml)), "<inline>")
    }

    fn extract(figment: Figment, origin: &str) -> Result<Persona, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidPersona {
            origin: origin.to_string(),
            reason,
        };

        let raw: PersonaFile = figment.extract().map_err(|e| invalid(e.to_string()))?;

        let persona = Persona::new(raw.name, raw.universe, raw.personality, raw.response_rules)
            .map_err(|e| invalid(e.to_string()))?;

        Ok(match raw.greeting {
            Some(greeting) => persona.with_greeting(greeting),
            None => persona,
        })
    }
}
