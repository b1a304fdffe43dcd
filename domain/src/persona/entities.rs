//! Persona entity

use crate::core::error::DomainError;
use crate::prompt::persona::PersonaPromptTemplate;
use serde::Serialize;

/// The character the user is talking to (Entity)
///
/// Loaded once at session start and immutable afterwards. The only
/// invariant is a non-blank name; traits and response rules may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    name: String,
    universe: String,
    traits: Vec<String>,
    response_rules: Vec<String>,
    greeting: Option<String>,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        universe: impl Into<String>,
        traits: Vec<String>,
        response_rules: Vec<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyPersonaName);
        }

        Ok(Self {
            name,
            universe: universe.into(),
            traits,
            response_rules,
            greeting: None,
        })
    }

    /// Set the line the character opens the conversation with
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        self.greeting = if greeting.trim().is_empty() {
            None
        } else {
            Some(greeting)
        };
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &str {
        &self.universe
    }

    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    pub fn response_rules(&self) -> &[String] {
        &self.response_rules
    }

    /// Opening line shown (and spoken) when the chat starts.
    pub fn greeting(&self) -> String {
        match &self.greeting {
            Some(greeting) => greeting.clone(),
            None => format!(
                "Hi~ I'm {}, nice to meet you! What would you like to talk about?",
                self.name
            ),
        }
    }

    /// Build the system-level instruction text for this persona.
    ///
    /// Pure and deterministic: the same persona always yields the same prompt.
    pub fn build_system_prompt(&self) -> String {
        PersonaPromptTemplate::system_prompt(self)
    }
}
