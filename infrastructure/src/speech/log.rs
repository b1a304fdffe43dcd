//! Speech that only goes to the log

use persona_application::SpeechSink;
use persona_domain::util::preview;
use tracing::debug;

/// Used when no TTS command is configured
pub struct LogSpeechSink;

impl SpeechSink for LogSpeechSink {
    fn speak(&self, text: &str) {
        debug!("(speech) {}", preview(text, 120));
    }
}
