//! Request lifecycle state machine
//!
//! ```text
//! Idle ──begin──> Pending ──succeed──> Succeeded ──settle──> Idle
//!                    └─────fail──────> Failed ─────settle──> Idle
//! ```

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle of the single request a session may have in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Pending => "pending",
            RequestState::Succeeded => "succeeded",
            RequestState::Failed => "failed",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: RequestState) -> bool {
        matches!(
            (self, next),
            (RequestState::Idle, RequestState::Pending)
                | (RequestState::Pending, RequestState::Succeeded)
                | (RequestState::Pending, RequestState::Failed)
                | (RequestState::Succeeded, RequestState::Idle)
                | (RequestState::Failed, RequestState::Idle)
        )
    }

    /// Move to `next`, rejecting any transition outside the lifecycle
    pub fn transition(&mut self, next: RequestState) -> Result<(), DomainError> {
        if !self.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    /// Idle -> Pending
    pub fn begin(&mut self) -> Result<(), DomainError> {
        self.transition(RequestState::Pending)
    }

    /// Pending -> Succeeded
    pub fn succeed(&mut self) -> Result<(), DomainError> {
        self.transition(RequestState::Succeeded)
    }

    /// Pending -> Failed
    pub fn fail(&mut self) -> Result<(), DomainError> {
        self.transition(RequestState::Failed)
    }

    /// Succeeded/Failed -> Idle, once the outcome reached the surface
    pub fn settle(&mut self) -> Result<(), DomainError> {
        self.transition(RequestState::Idle)
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_cycle() {
        let mut state = RequestState::default();
        assert!(state.is_idle());
        state.begin().unwrap();
        assert!(state.is_pending());
        state.succeed().unwrap();
        assert_eq!(state, RequestState::Succeeded);
        state.settle().unwrap();
        assert!(state.is_idle());
    }

    #[test]
    fn test_failure_cycle() {
        let mut state = RequestState::Idle;
        state.begin().unwrap();
        state.fail().unwrap();
        assert_eq!(state, RequestState::Failed);
        state.settle().unwrap();
        assert!(state.is_idle());
    }

    #[test]
    fn test_begin_while_pending_is_rejected() {
        let mut state = RequestState::Pending;
        let err = state.begin().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: RequestState::Pending,
                to: RequestState::Pending,
            }
        );
        assert!(state.is_pending());
    }

    #[test]
    fn test_outcome_without_request_is_rejected() {
        let mut state = RequestState::Idle;
        assert!(state.succeed().is_err());
        assert!(state.fail().is_err());
        assert!(state.settle().is_err());
        assert!(state.is_idle());
    }

    #[test]
    fn test_cannot_skip_settle() {
        let mut state = RequestState::Succeeded;
        assert!(state.begin().is_err());
        assert!(state.fail().is_err());
    }
}
