use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::uploads::handlers;
use crate::features::uploads::services::UploadService;

/// Create routes for the uploads feature
///
/// Requires the auth middleware to be applied by the caller
pub fn routes(upload_service: Arc<UploadService>) -> Router {
    Router::new()
        .route("/api/upload/images", post(handlers::upload_images))
        .with_state(upload_service)
}
