//! Slash commands understood by the chat surface

/// A line starting with `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    History,
    Persona,
    Quit,
    Unknown(String),
}

impl SlashCommand {
    /// Returns `None` for ordinary chat input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let name = line.split_whitespace().next().unwrap_or(line);
        Some(match name {
            "/help" | "/h" | "/?" => Self::Help,
            "/history" => Self::History,
            "/persona" => Self::Persona,
            "/quit" | "/exit" | "/q" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        })
    }

    pub fn help_text() -> &'static str {
        "Commands:\n  /help, /h, /?     - Show this help\n  /history          - Show the conversation so far\n  /persona          - Show the character and model settings\n  /quit, /exit, /q  - Exit chat"
    }
}
