//! Application-level configuration.
//!
//! - [`SessionSettings`]: model and temperature shared by a session's requests

pub mod session_settings;

pub use session_settings::SessionSettings;
