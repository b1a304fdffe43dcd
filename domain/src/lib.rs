//! Domain layer for persona-chat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Persona**: the configured character and the system prompt built from it
//! - **Conversation history**: append-only log of user and assistant turns
//! - **Request state**: Idle → Pending → Succeeded/Failed → Idle, one per session
//! - **Completion request/result**: what goes to the model and what comes back

pub mod completion;
pub mod core;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use completion::{
    request::{CompletionRequest, DEFAULT_TEMPERATURE, validate_temperature},
    result::{CompletionResult, ErrorKind},
};
pub use core::{error::DomainError, user_text::UserText};
pub use persona::entities::Persona;
pub use prompt::{MAX_EXAMPLE_RULES, PersonaPromptTemplate};
pub use session::{
    entities::{ConversationHistory, Message, Role},
    request_state::RequestState,
};
