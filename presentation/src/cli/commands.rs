//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for persona-chat
#[derive(Parser, Debug)]
#[command(name = "persona-chat")]
#[command(author, version, about = "Chat with an anime character backed by an LLM")]
#[command(long_about = r#"
Persona Chat lets you talk to a character defined in a YAML profile.
Replies come from an OpenAI-compatible chat completion endpoint and can be
read aloud through a text-to-speech command.

Required environment (or config file keys in lower case):
  API_KEY, MODEL_ID
Optional:
  API_BASE_URL, CHARACTER_PROFILE_PATH, TEMPERATURE, REQUEST_TIMEOUT_SECS, TTS_COMMAND

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./persona-chat.toml Project-level config
3. ~/.config/persona-chat/config.toml   Global config
Environment variables (and .env) override all files.

Example:
  persona-chat
  persona-chat --profile config/kiki.yaml --mute
  persona-chat "What's your favorite place to fly?"
"#)]
pub struct Cli {
    /// Send a single message, print the reply and exit
    pub message: Option<String>,

    /// Character profile (overrides CHARACTER_PROFILE_PATH)
    #[arg(short, long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Model to use (overrides MODEL_ID)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature, 0.0 to 2.0 (overrides TEMPERATURE)
    #[arg(short, long, value_name = "TEMP")]
    pub temperature: Option<f32>,

    /// Do not speak replies
    #[arg(long)]
    pub mute: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the spinner while waiting for a reply
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and effective values, then exit
    #[arg(long)]
    pub show_config: bool,
}
