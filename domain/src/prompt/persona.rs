//! Prompt templates for persona-driven chat

use crate::persona::entities::Persona;

/// Maximum number of response rules quoted in the system prompt
pub const MAX_EXAMPLE_RULES: usize = 5;

/// Templates for the persona system prompt
pub struct PersonaPromptTemplate;

impl PersonaPromptTemplate {
    /// Fixed behavioral constraints every persona follows
    pub fn behavior_rules() -> &'static str {
        r#"Follow these rules strictly when talking with the user:
1. Keep replies short and colloquial, true to the character's personality
2. Respond in the way that fits each situation
3. Pay close attention to the user's feelings and offer emotional support
4. Keep every reply to 1-2 sentences"#
    }

    /// System prompt for a persona
    pub fn system_prompt(persona: &Persona) -> String {
        let mut prompt = format!(
            r#"You are an anime character named {name}, from {universe}.
Your personality traits: {traits}.

{rules}"#,
            name = persona.name(),
            universe = persona.universe(),
            traits = persona.traits().join(", "),
            rules = Self::behavior_rules(),
        );

        let examples = Self::example_rules(persona.response_rules());
        if !examples.is_empty() {
            prompt.push_str("\n\nExample response rules:\n");
            prompt.push_str(&examples);
        }

        prompt.push_str(&format!(
            "\n\nAlways speak as {} in their own voice and tone, and never reveal that you are an AI assistant.",
            persona.name()
        ));

        prompt
    }

    /// Bullet list of the first [`MAX_EXAMPLE_RULES`] rules, in file order
    fn example_rules(rules: &[String]) -> String {
        rules
            .iter()
            .take(MAX_EXAMPLE_RULES)
            .map(|rule| format!("- {}", rule))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona_with_rules(count: usize) -> Persona {
        let rules = (1..=count).map(|i| format!("rule number {}", i)).collect();
        Persona::new(
            "Kiki",
            "TestVerse",
            vec!["cheerful".to_string(), "curious".to_string()],
            rules,
        )
        .unwrap()
    }

    #[test]
    fn test_prompt_interpolates_identity() {
        let prompt = PersonaPromptTemplate::system_prompt(&persona_with_rules(1));
        assert!(prompt.contains("named Kiki"));
        assert!(prompt.contains("from TestVerse"));
        assert!(prompt.contains("cheerful, curious"));
        assert!(prompt.contains("1-2 sentences"));
        assert!(prompt.contains("never reveal that you are an AI"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let persona = persona_with_rules(3);
        assert_eq!(persona.build_system_prompt(), persona.build_system_prompt());
    }

    #[test]
    fn test_prompt_keeps_first_five_rules_in_order() {
        let prompt = PersonaPromptTemplate::system_prompt(&persona_with_rules(6));

        let positions: Vec<usize> = (1..=5)
            .map(|i| prompt.find(&format!("- rule number {}", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!prompt.contains("rule number 6"));
    }

    #[test]
    fn test_prompt_without_rules_omits_examples() {
        let prompt = PersonaPromptTemplate::system_prompt(&persona_with_rules(0));
        assert!(!prompt.contains("Example response rules"));
        assert!(prompt.ends_with("never reveal that you are an AI assistant."));
    }
}
