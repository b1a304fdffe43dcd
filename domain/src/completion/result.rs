//! Completion result types

use serde::{Deserialize, Serialize};

/// Category of a failed completion call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport-level failure or timeout
    Network,
    /// The remote service answered with a failure
    Api,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Network => f.write_str("network error"),
            ErrorKind::Api => f.write_str("API error"),
        }
    }
}

/// Outcome of a single chat-completion call
///
/// `Text("")` is a valid success meaning "nothing to display"; callers
/// must not treat it as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionResult {
    Text(String),
    Error(ErrorKind, String),
}

impl CompletionResult {
    pub fn network(message: impl Into<String>) -> Self {
        CompletionResult::Error(ErrorKind::Network, message.into())
    }

    pub fn api(message: impl Into<String>) -> Self {
        CompletionResult::Error(ErrorKind::Api, message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CompletionResult::Error(..))
    }

    /// Returns the text if this is a successful result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CompletionResult::Text(text) => Some(text),
            CompletionResult::Error(..) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            CompletionResult::network("timeout"),
            CompletionResult::Error(ErrorKind::Network, "timeout".to_string())
        );
        assert_eq!(
            CompletionResult::api("invalid key"),
            CompletionResult::Error(ErrorKind::Api, "invalid key".to_string())
        );
    }

    #[test]
    fn test_empty_text_is_not_an_error() {
        let result = CompletionResult::Text(String::new());
        assert!(!result.is_error());
        assert_eq!(result.as_text(), Some(""));
    }

    #[test]
    fn test_error_has_no_text() {
        assert_eq!(CompletionResult::network("down").as_text(), None);
        assert_eq!(ErrorKind::Api.to_string(), "API error");
    }
}
