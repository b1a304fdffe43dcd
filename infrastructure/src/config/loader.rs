//! Configuration loader with multi-source merging

use super::app_config::AppConfig;
use super::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "persona-chat";
const PROJECT_CONFIG_FILE: &str = "persona-chat.toml";

/// Environment variables read into [`AppConfig`]
pub const ENV_KEYS: [&str; 7] = [
    "API_BASE_URL",
    "API_KEY",
    "MODEL_ID",
    "CHARACTER_PROFILE_PATH",
    "TEMPERATURE",
    "REQUEST_TIMEOUT_SECS",
    "TTS_COMMAND",
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (including `.env`, see [`Self::load_dotenv`])
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./persona-chat.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/persona-chat/config.toml`
    /// 5. Default values
    ///
    /// With `skip_files` only defaults and the environment are used.
    pub fn load(config_path: Option<&Path>, skip_files: bool) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = Self::figment(config_path, skip_files)
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the merged provider without extracting it
    pub fn figment(config_path: Option<&Path>, skip_files: bool) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if !skip_files {
            if let Some(global_path) = Self::global_config_path() {
                if global_path.exists() {
                    debug!("Using global config {}", global_path.display());
                    figment = figment.merge(Toml::file(&global_path));
                }
            }

            if let Some(project_path) = Self::project_config_path() {
                debug!("Using project config {}", project_path.display());
                figment = figment.merge(Toml::file(&project_path));
            }

            // An explicit file that is missing is an error, not a silent skip
            if let Some(path) = config_path {
                figment = figment.merge(Toml::file_exact(path));
            }
        }

        figment.merge(Env::raw().only(&ENV_KEYS))
    }

    /// Load `.env` from the current directory or its parents, if present.
    ///
    /// Variables already set in the process environment win.
    pub fn load_dotenv() -> Option<PathBuf> {
        match dotenvy::dotenv() {
            Ok(path) => {
                debug!("Loaded environment from {}", path.display());
                Some(path)
            }
            Err(e) if e.not_found() => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
                None
            }
        }
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/persona-chat/config.toml if set,
    /// otherwise falls back to ~/.config/persona-chat/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>, skip_files: bool) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}", ENV_KEYS.join(", "));

        if skip_files {
            println!("  [SKIP ] Config files (--no-config)");
        } else {
            if let Some(path) = config_path {
                let mark = if path.exists() { "FOUND" } else { "MISS " };
                println!("  [{}] Explicit: {}", mark, path.display());
            }

            if let Some(path) = Self::project_config_path() {
                println!("  [FOUND] Project: {}", path.display());
            } else {
                println!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE);
            }

            if let Some(path) = Self::global_config_path() {
                if path.exists() {
                    println!("  [FOUND] Global:  {}", path.display());
                } else {
                    println!("  [     ] Global:  {}", path.display());
                }
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
