use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// All routes require the auth middleware to be applied by the caller
pub fn routes(report_service: Arc<ReportService>) -> Router {
    let state = ReportState { report_service };

    Router::new()
        .route("/api/reports", post(handlers::create_report))
        .route(
            "/api/reports/my-reports",
            get(handlers::list_my_reports),
        )
        .route("/api/reports/{id}", get(handlers::get_report))
        .route(
            "/api/reports/{id}/images",
            get(handlers::list_report_images),
        )
        .route(
            "/api/reports/{id}/images/{index}",
            get(handlers::get_report_image),
        )
        .with_state(state)
}
