//! Conversation session domain.
//!
//! - [`entities::Message`]: a single turn within a conversation
//! - [`entities::ConversationHistory`]: append-only turn log
//! - [`request_state::RequestState`]: lifecycle of the in-flight request

pub mod entities;
pub mod request_state;
