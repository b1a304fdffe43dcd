//! Application layer for persona-chat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionSettings;
pub use ports::{
    completion_client::CompletionClient,
    session_event::SessionEvent,
    speech_sink::{NoSpeech, SpeechSink},
};
pub use use_cases::conversation_session::{ConversationSession, SubmitStatus};
pub use use_cases::request_worker::{
    DispatchFailure, DispatchId, DispatchResult, FailureKind, RequestWorker, WorkerError,
    WorkerOutcome,
};
