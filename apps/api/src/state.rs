use std::sync::Arc;

use crate::catalog::{CategoryRegistry, DocumentStore};
use crate::config::Config;
use crate::llm_client::TextCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; read-only afterwards.
    pub registry: Arc<CategoryRegistry>,
    pub store: Arc<dyn DocumentStore>,
    /// `None` when no API key is configured.
    pub assistant: Option<Arc<dyn TextCompletion>>,
}
