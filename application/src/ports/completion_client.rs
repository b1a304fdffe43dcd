//! Completion client port
//!
//! Defines the interface for talking to a chat-completion provider.

use async_trait::async_trait;
use persona_domain::{CompletionRequest, CompletionResult};

/// Client for a remote chat-completion endpoint
///
/// This port defines how the application layer requests a reply from the
/// model. Implementations (adapters) live in the infrastructure layer.
///
/// `complete` waits for the full response and never retries on its own;
/// every failure is folded into [`CompletionResult::Error`] so a single
/// call always produces exactly one result.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one system turn plus one user turn and wait for the reply
    async fn complete(&self, request: CompletionRequest) -> CompletionResult;
}
