use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::{handlers, CategoryRegistry};

/// Create routes for the categories feature (public)
pub fn routes(registry: Arc<CategoryRegistry>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .with_state(registry)
}
