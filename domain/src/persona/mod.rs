//! Persona domain.
//!
//! - [`entities::Persona`]: the character identity and its behavioral rules

pub mod entities;
