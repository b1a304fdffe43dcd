//! Chat-completion value objects.
//!
//! - [`request::CompletionRequest`]: system prompt, user text, model and temperature
//! - [`result::CompletionResult`]: text or a categorized error

pub mod request;
pub mod result;
