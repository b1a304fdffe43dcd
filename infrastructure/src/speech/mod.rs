//! Speech sink adapters

mod command;
mod log;

pub use command::CommandSpeechSink;
pub use log::LogSpeechSink;
