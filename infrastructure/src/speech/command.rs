//! Speech through an external TTS program
//!
//! `speak` only enqueues. A single background task drains the queue and runs
//! the program once per utterance with the text as its last argument, so
//! utterances never overlap and play in the order they were queued.

use crate::config::ConfigError;
use persona_application::SpeechSink;
use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct CommandSpeechSink {
    queue: Mutex<Option<mpsc::UnboundedSender<String>>>,
    player: Mutex<Option<JoinHandle<()>>>,
}

impl CommandSpeechSink {
    /// Parse a command line such as `say -v Kyoko` and start the player task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_command_line(command_line: &str) -> Result<Self, ConfigError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| ConfigError::InvalidValue {
            key: "TTS_COMMAND",
            reason: "cannot be empty".to_string(),
        })?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Start the player task for `program args... <text>`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let player = tokio::spawn(play_queue(program.into(), args, rx));
        Self {
            queue: Mutex::new(Some(tx)),
            player: Mutex::new(Some(player)),
        }
    }

    /// Stop accepting text and wait until everything queued has been spoken.
    pub async fn drain(&self) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.take();
        }
        let player = self.player.lock().ok().and_then(|mut p| p.take());
        if let Some(player) = player {
            if let Err(e) = player.await {
                warn!("Speech player task ended abnormally: {}", e);
            }
        }
    }
}

impl SpeechSink for CommandSpeechSink {
    fn speak(&self, text: &str) {
        let Ok(queue) = self.queue.lock() else {
            return;
        };
        match queue.as_ref() {
            Some(tx) if tx.send(text.to_string()).is_ok() => {}
            _ => debug!("Speech queue closed; dropping utterance"),
        }
    }
}

async fn play_queue(program: String, args: Vec<String>, mut rx: mpsc::UnboundedReceiver<String>) {
    while let Some(text) = rx.recv().await {
        play_one(&program, &args, &text).await;
    }
    debug!("Speech queue drained");
}

async fn play_one(program: &str, args: &[String], text: &str) {
    let output = Command::new(program)
        .args(args)
        .arg(text)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {}
        Ok(output) => warn!(
            status = %output.status,
            "TTS command '{}' failed: {}",
            program,
            String::from_utf8_lossy(&output.stderr).trim()
        ),
        Err(e) => warn!("Failed to run TTS command '{}': {}", program, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_command_line_is_rejected() {
        assert!(matches!(
            CommandSpeechSink::from_command_line("   "),
            Err(ConfigError::InvalidValue { key: "TTS_COMMAND", .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn speaks_in_order_with_text_as_last_argument() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("spoken.txt");
        // `sh -c script` binds the next argument to $0
        let script = format!("printf '%s\\n' \"$0\" >> '{}'", out.display());
        let sink = CommandSpeechSink::new("sh", vec!["-c".to_string(), script]);

        sink.speak("first line");
        sink.speak("second line");
        sink.drain().await;

        let spoken = std::fs::read_to_string(&out).unwrap();
        assert_eq!(spoken, "first line\nsecond line\n");
    }

    #[tokio::test]
    async fn missing_program_does_not_propagate() {
        let sink = CommandSpeechSink::from_command_line("definitely-not-a-tts-program-xyz").unwrap();
        sink.speak("hello");
        sink.drain().await;
    }

    #[tokio::test]
    async fn speak_after_drain_is_dropped() {
        let sink = CommandSpeechSink::new("true", Vec::new());
        sink.drain().await;
        sink.speak("too late");
        sink.drain().await;
    }
}
