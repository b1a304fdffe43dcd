//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod conversation_session;
pub mod request_worker;

#[cfg(test)]
pub(crate) mod test_support;
