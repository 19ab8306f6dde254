// GradBuddy assistant prompt templates.
// {context} and {history} are replaced with JSON before the call.

use crate::assistant::sampler::ContextSample;
use crate::llm_client::ChatMessage;

pub const GRADBUDDY_SYSTEM_PROMPT: &str = r#"You are "GradBuddy", a helpful career guidance chatbot for the "Beyond Degrees" platform.
Your goal is to help students explore career paths, skills, and life skills.
You have access to information about various streams like Science, Commerce, Arts, Business, and more.
Refer to these categories and topics from our data: {context}.
Keep your responses encouraging, concise, informative, and detailed.
Provide thorough textual explanations for all career-related queries.

When suggesting career paths:
1. ONLY provide a Mermaid flowchart if the user explicitly asks for one (e.g., "show me a roadmap", "draw a flowchart", "visualize this").
2. If requested, use 'graph TD' (Top-Down).
3. ALWAYS wrap node labels in double quotes and square brackets: A["Label"].
4. Keep IDENTIFIERS (like A, B, C) as single letters or simple words.
5. Ensure the syntax is valid.
Always start by welcoming the user if it's the beginning of the conversation.
Current conversation context: {history}"#;

pub fn build_system_prompt(
    sample: &ContextSample,
    history: &[ChatMessage],
) -> Result<String, serde_json::Error> {
    let context_json = serde_json::to_string(sample)?;
    let history_json = serde_json::to_string(history)?;
    // History goes in last so text inside it is never treated as a placeholder.
    Ok(GRADBUDDY_SYSTEM_PROMPT
        .replace("{context}", &context_json)
        .replace("{history}", &history_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_context_and_history() {
        let history = vec![ChatMessage::user("What is a CA?")];
        let prompt = build_system_prompt(&ContextSample::default(), &history).unwrap();

        assert!(prompt.starts_with("You are \"GradBuddy\""));
        assert!(prompt.contains("from our data: {}."));
        assert!(prompt.contains(r#"Current conversation context: [{"role":"user","content":"What is a CA?"}]"#));
        assert!(!prompt.contains("{history}"));
    }
}
