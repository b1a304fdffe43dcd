//! Session settings: what every outbound request of a session shares.
//!
//! [`SessionSettings`] carries the model identifier and sampling
//! temperature that [`ConversationSession`](crate::use_cases::conversation_session::ConversationSession)
//! stamps onto each [`CompletionRequest`](persona_domain::CompletionRequest).

use persona_domain::{DEFAULT_TEMPERATURE, DomainError, validate_temperature};

/// Per-session request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Model identifier sent with every request.
    pub model_id: String,
    /// Sampling temperature, always within 0.0-2.0.
    temperature: f32,
}

impl SessionSettings {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, DomainError> {
        self.temperature = validate_temperature(temperature)?;
        Ok(self)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}
