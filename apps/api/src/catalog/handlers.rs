use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::catalog::aggregator::{Aggregator, CatalogError};
use crate::catalog::models::Category;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/concepts
pub async fn handle_get_catalog(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let catalog = with_aggregator(&state, |aggregator| aggregator.catalog()).await?;
    info!(
        "Served catalog: {} categories, {} entries",
        catalog.len(),
        catalog.iter().map(|c| c.sources.len()).sum::<usize>()
    );
    Ok(Json(catalog))
}

/// GET /api/concepts/:category_id
pub async fn handle_get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Category>, AppError> {
    let category =
        with_aggregator(&state, move |aggregator| aggregator.category(&category_id)).await?;
    Ok(Json(category))
}

/// Runs an aggregation on the blocking pool. Document reads and parsing are
/// synchronous and redone on every request.
async fn with_aggregator<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&Aggregator<'_>) -> Result<T, CatalogError> + Send + 'static,
{
    let registry = state.registry.clone();
    let store = state.store.clone();
    let policy = state.config.malformed_policy;

    tokio::task::spawn_blocking(move || {
        let aggregator = Aggregator::new(&registry, store.as_ref(), policy);
        f(&aggregator)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("catalog task failed: {e}")))?
    .map_err(AppError::from)
}
