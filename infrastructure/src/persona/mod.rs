//! Character profile adapters

mod loader;

pub use loader::PersonaLoader;
