use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes (all require admin access)
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/reports", get(handlers::list_reports))
        .route("/reports/{id}", get(handlers::get_report))
        .route("/reports/{id}/status", patch(handlers::update_report_status))
        .route("/reports/{id}/images", get(handlers::list_report_images))
        .route(
            "/reports/{id}/images/{index}",
            get(handlers::get_report_image),
        )
        .route("/dashboard/stats", get(handlers::dashboard_stats))
        .with_state(admin_service)
}
