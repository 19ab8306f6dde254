// GradBuddy assistant: samples the content documents into a small prompt
// context and forwards the conversation to the text-completion backend.
// All completion calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod sampler;
