//! Domain error types

use crate::session::request_state::RequestState;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Persona name cannot be empty")]
    EmptyPersonaName,

    #[error("Temperature {0} is outside the supported range 0.0-2.0")]
    InvalidTemperature(f32),

    #[error("Invalid request state transition: {from} -> {to}")]
    InvalidTransition { from: RequestState, to: RequestState },
}

impl DomainError {
    /// Check if this error comes from the request state machine
    pub fn is_transition(&self) -> bool {
        matches!(self, DomainError::InvalidTransition { .. })
    }
}
