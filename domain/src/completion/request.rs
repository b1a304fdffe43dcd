//! Completion request value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Sampling temperature used when none is configured
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Inclusive bounds accepted by chat-completion endpoints
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// One outbound chat-completion call (Value Object)
///
/// Built fresh for every dispatch and never retained afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_text: String,
    pub model_id: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_text: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_text: user_text.into(),
            model_id: model_id.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, DomainError> {
        self.temperature = validate_temperature(temperature)?;
        Ok(self)
    }
}

/// Check that a temperature lies within the supported range
pub fn validate_temperature(temperature: f32) -> Result<f32, DomainError> {
    if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(DomainError::InvalidTemperature(temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_temperature() {
        let request = CompletionRequest::new("system", "hello", "gpt-4o");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.user_text, "hello");
    }

    #[test]
    fn test_temperature_bounds() {
        let request = CompletionRequest::new("s", "u", "m");
        assert_eq!(request.clone().with_temperature(0.0).unwrap().temperature, 0.0);
        assert_eq!(request.clone().with_temperature(2.0).unwrap().temperature, 2.0);
        assert_eq!(
            request.clone().with_temperature(2.5),
            Err(DomainError::InvalidTemperature(2.5))
        );
        assert!(request.with_temperature(-0.1).is_err());
    }

    #[test]
    fn test_nan_temperature_is_rejected() {
        assert!(validate_temperature(f32::NAN).is_err());
    }
}
