//! Chat completion adapters

mod openai;
mod settings;

pub use openai::OpenAiCompletionClient;
pub use settings::CompletionSettings;
