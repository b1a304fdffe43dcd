//! Console formatting for chat turns and session details

use colored::Colorize;
use persona_application::SessionSettings;
use persona_domain::{Message, Persona, Role};

/// Formats chat output for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One line of dialogue from the character
    pub fn character_turn(name: &str, text: &str) -> String {
        format!("{} {}", format!("{name}:").magenta().bold(), text.trim_end())
    }

    /// A failed request, phrased for the user
    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Notice shown when input arrives while a reply is pending
    pub fn busy(name: &str) -> String {
        format!("{name} is still answering; wait for the reply first.")
            .yellow()
            .to_string()
    }

    /// The conversation so far
    pub fn history(name: &str, messages: &[Message]) -> String {
        if messages.is_empty() {
            return "(no messages yet)".dimmed().to_string();
        }

        let mut output = String::new();
        for message in messages {
            let speaker = match message.role {
                Role::User => "You:".cyan().bold().to_string(),
                Role::Assistant => format!("{name}:").magenta().bold().to_string(),
                Role::System => "System:".dimmed().to_string(),
            };
            output.push_str(&format!("{} {}\n", speaker, message.content.trim_end()));
        }
        output
    }

    /// Character card plus request settings
    pub fn persona(persona: &Persona, settings: &SessionSettings) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n",
            "Character:".cyan().bold(),
            persona.name()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Universe:".cyan().bold(),
            persona.universe()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Personality:".cyan().bold(),
            persona.traits().join(", ")
        ));
        if !persona.response_rules().is_empty() {
            output.push_str(&format!("{}\n", "Response rules:".cyan().bold()));
            for rule in persona.response_rules() {
                output.push_str(&format!("  - {}\n", rule));
            }
        }
        output.push_str(&format!(
            "{} {} (temperature {})\n",
            "Model:".cyan().bold(),
            settings.model_id,
            settings.temperature()
        ));
        output
    }

    /// Banner printed when the chat starts
    pub fn welcome(persona: &Persona) -> String {
        let title = format!("Chatting with {}", persona.name());
        let width = title.chars().count() + 4;
        let mut output = String::new();
        output.push('\n');
        output.push_str(&format!("╭{}╮\n", "─".repeat(width)));
        output.push_str(&format!("│  {}  │\n", title.bold()));
        output.push_str(&format!("╰{}╯\n", "─".repeat(width)));
        output.push_str(&format!("{}\n", "Type /help for commands.".dimmed()));
        output
    }
}
