mod assistant;
mod catalog;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{CategoryRegistry, DocumentStore, FsDocumentStore};
use crate::config::Config;
use crate::llm_client::{LlmClient, TextCompletion};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Concept Hub API v{}", env!("CARGO_PKG_VERSION"));

    // Category registry: built once, shared read-only
    let registry = match &config.category_registry_path {
        Some(path) => CategoryRegistry::from_json_file(path)?,
        None => CategoryRegistry::builtin(),
    };
    info!(
        "Category registry: {}",
        registry.list_categories().join(", ")
    );

    let fs_store = FsDocumentStore::new(&config.data_path);
    if !fs_store.root().is_dir() {
        warn!(
            "Data directory {} does not exist; every category will be empty",
            fs_store.root().display()
        );
    }
    info!(
        "Serving documents from {} (malformed documents: {:?})",
        fs_store.root().display(),
        config.malformed_policy
    );
    let store: Arc<dyn DocumentStore> = Arc::new(fs_store);

    // Initialize assistant client (optional)
    let assistant: Option<Arc<dyn TextCompletion>> = match &config.groq_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.assistant_model.clone())?;
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        None => {
            warn!("GROQ_API_KEY not set; /api/gradbuddy will return 503");
            None
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        registry: Arc::new(registry),
        store,
        assistant,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
