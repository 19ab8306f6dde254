//! Axum route handler for the GradBuddy assistant.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::prompts::build_system_prompt;
use crate::assistant::sampler::{ContextSample, ContextSampler};
use crate::errors::AppError;
use crate::llm_client::ChatMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/gradbuddy
///
/// Sends system prompt, prior history, then the new user message.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    let assistant = state
        .assistant
        .clone()
        .ok_or(AppError::AssistantNotConfigured)?;

    let sample = build_context(&state).await?;
    let system_prompt = build_system_prompt(&sample, &request.history)
        .map_err(|e| AppError::Internal(e.into()))?;

    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(request.history.iter().cloned());
    messages.push(ChatMessage::user(request.message));

    let reply = assistant
        .complete(&messages)
        .await
        .map_err(|e| AppError::Llm(format!("GradBuddy completion failed: {e}")))?;

    info!(
        "GradBuddy replied ({} history turns, {} sampled documents)",
        request.history.len(),
        sample.document_names().len()
    );
    Ok(Json(ChatResponse { reply }))
}

async fn build_context(state: &AppState) -> Result<ContextSample, AppError> {
    let store = state.store.clone();
    let documents = state.config.context_documents.clone();
    let policy = state.config.malformed_policy;

    tokio::task::spawn_blocking(move || {
        ContextSampler::new(store.as_ref(), &documents, policy).build_context()
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("context sampling task failed: {e}")))?
    .map_err(AppError::from)
}
