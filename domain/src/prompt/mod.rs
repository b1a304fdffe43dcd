//! Prompt templates

pub mod persona;

pub use persona::{MAX_EXAMPLE_RULES, PersonaPromptTemplate};
