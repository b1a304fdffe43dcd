//! Session event types emitted by ConversationSession for the interaction surface
//!
//! These events form the output port from the application layer to the
//! presentation layer, which renders them however it likes.

/// Events emitted by ConversationSession for the surface to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Opening line from the character (display only, not part of history)
    Greeting(String),
    /// A request was dispatched; input is disabled until `Ready`
    AwaitingReply,
    /// The character replied
    AssistantTurn(String),
    /// The request failed; the message is meant for the user
    Error(String),
    /// The previous request settled; input is enabled again
    Ready,
}
