//! Core domain concepts shared across all subdomains.
//!
//! - [`user_text::UserText`]: validated, trimmed user input
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod user_text;
