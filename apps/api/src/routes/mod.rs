pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::catalog::handlers as catalog;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Concept hub catalog
        .route("/api/concepts", get(catalog::handle_get_catalog))
        .route(
            "/api/concepts/:category_id",
            get(catalog::handle_get_category),
        )
        // GradBuddy assistant
        .route("/api/gradbuddy", post(assistant::handle_chat))
        .with_state(state)
}
