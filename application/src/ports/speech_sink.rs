//! Port for text-to-speech output.
//!
//! The session hands finished replies to a [`SpeechSink`] and moves on.
//! Speaking happens elsewhere; the session never waits for audio.

/// Renders text to audio, fire-and-forget.
///
/// `speak` must return promptly and must not fail back into the caller.
/// Implementations queue the work and log their own failures.
pub trait SpeechSink: Send + Sync {
    fn speak(&self, text: &str);
}

/// No-op implementation for tests and muted sessions.
pub struct NoSpeech;

impl SpeechSink for NoSpeech {
    fn speak(&self, _text: &str) {}
}
