//! CLI entrypoint for Persona Chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use persona_application::{
    CompletionClient, ConversationSession, NoSpeech, RequestWorker, SessionSettings, SpeechSink,
};
use persona_infrastructure::{
    AppConfig, CommandSpeechSink, CompletionSettings, ConfigLoader, LogSpeechSink,
    OpenAiCompletionClient, PersonaLoader,
};
use persona_presentation::{ChatSurface, Cli};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Persona Chat");

    // === Configuration ===
    ConfigLoader::load_dotenv();
    let mut config = ConfigLoader::load(cli.config.as_deref(), cli.no_config)
        .context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Invalid command-line option")?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref(), cli.no_config);
        println!();
        print!("{}", config.to_redacted_toml()?);
        return Ok(());
    }

    let persona = PersonaLoader::load(&config.character_profile_path).with_context(|| {
        format!(
            "Failed to load character profile {}",
            config.character_profile_path.display()
        )
    })?;
    let completion = CompletionSettings::from_config(&config)
        .context("Completion endpoint is not configured")?;
    info!(
        "Character '{}' using model {} at {}",
        persona.name(),
        completion.model_id,
        completion.base_url
    );

    // === Dependency Injection ===
    let settings = SessionSettings::new(completion.model_id.clone())
        .with_temperature(config.temperature)
        .context("Invalid temperature")?;
    let client: Arc<dyn CompletionClient> = Arc::new(OpenAiCompletionClient::new(completion)?);

    let tts = match (cli.mute, config.tts_command()) {
        (false, Some(command)) => Some(Arc::new(CommandSpeechSink::from_command_line(command)?)),
        _ => None,
    };
    let speech: Arc<dyn SpeechSink> = match (&tts, cli.mute) {
        (Some(tts), _) => tts.clone(),
        (None, true) => Arc::new(NoSpeech),
        (None, false) => Arc::new(LogSpeechSink),
    };

    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let worker = RequestWorker::new(client, outcome_tx);
    let session =
        ConversationSession::new(persona, settings, worker, event_tx).with_speech_sink(speech);
    let mut surface = ChatSurface::new(session, outcome_rx, event_rx).with_progress(!cli.quiet);

    // One-shot mode
    if let Some(message) = &cli.message {
        let reply = surface.run_once(message).await?;
        println!("{}", reply);
        if let Some(tts) = &tts {
            tts.drain().await;
        }
        return Ok(());
    }

    surface.run().await.context("Chat input failed")?;
    Ok(())
}

/// Command-line options win over every config source
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(profile) = &cli.profile {
        config.character_profile_path = profile.clone();
    }
    if let Some(model) = &cli.model {
        config.model_id = Some(model.clone());
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }
}
