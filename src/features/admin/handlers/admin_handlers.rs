use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::{
    AdminReportDetailDto, AdminReportSummaryDto, DashboardStatsDto, UpdateReportStatusDto,
};
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::reports::dtos::ImageLinkDto;
use crate::features::reports::handlers::report_handler::image_response;
use crate::shared::types::ApiResponse;

/// List all reports with image previews (admin)
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    responses(
        (status = 200, description = "All reports", body = ApiResponse<Vec<AdminReportSummaryDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_reports(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<Vec<AdminReportSummaryDto>>>> {
    let reports = service.list_reports().await?;
    Ok(Json(ApiResponse::success(Some(reports), None, None)))
}

/// Get report details (admin)
#[utoipa::path(
    get,
    path = "/api/admin/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<AdminReportDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn get_report(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<AdminReportDetailDto>>> {
    let report = service.get_report(id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// List image links for a report (admin)
#[utoipa::path(
    get,
    path = "/api/admin/reports/{id}/images",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Image links", body = ApiResponse<Vec<ImageLinkDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_report_images(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<Vec<ImageLinkDto>>>> {
    let links = service.image_links(id).await?;
    Ok(Json(ApiResponse::success(Some(links), None, None)))
}

/// Serve one image of any report as binary (admin)
#[utoipa::path(
    get,
    path = "/api/admin/reports/{id}/images/{index}",
    params(
        ("id" = Uuid, Path, description = "Report ID"),
        ("index" = i32, Path, description = "Zero-based image index")
    ),
    responses(
        (status = 200, description = "Image bytes", body = Vec<u8>, content_type = "image/jpeg"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report or image not found")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn get_report_image(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path((id, index)): Path<(uuid::Uuid, i32)>,
) -> Result<Response> {
    let (bytes, content_type, filename) = service.get_image(id, index).await?;
    image_response(bytes, &content_type, Some(&filename))
}

/// Update report status (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/reports/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<AdminReportDetailDto>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn update_report_status(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<uuid::Uuid>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<AdminReportDetailDto>>> {
    let report = service.set_status(id, &dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Report status updated".to_string()),
        None,
    )))
}

/// Dashboard statistics (admin)
#[utoipa::path(
    get,
    path = "/api/admin/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = ApiResponse<DashboardStatsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn dashboard_stats(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>> {
    let stats = service.dashboard_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::shared::test_helpers::{
        admin_token, png_data_uri, test_app, user_token, InMemoryReportRepository,
    };

    fn server() -> TestServer {
        TestServer::new(test_app(Arc::new(InMemoryReportRepository::new()))).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "description": "Tumpukan sampah liar di pinggir kali sudah lebih dari dua minggu dibiarkan.",
            "category": "sampah",
            "location": "Jl. Kali Besar Timur",
            "coordinates": { "latitude": -6.13, "longitude": 106.81, "accuracy": 8.5 },
            "images": [{
                "data": png_data_uri(64, 64),
                "content_type": "image/png",
                "filename": "sampah.png"
            }]
        })
    }

    async fn submit_as(server: &TestServer, owner: &str) -> String {
        let res = server
            .post("/api/reports")
            .authorization_bearer(user_token(owner))
            .json(&valid_body())
            .await;
        res.assert_status(StatusCode::CREATED);
        res.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_non_admin_is_403() {
        let server = server();

        let res = server
            .get("/api/admin/reports")
            .authorization_bearer(user_token("user-1"))
            .await;
        res.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_list_spans_owners() {
        let server = server();

        submit_as(&server, "user-a").await;
        submit_as(&server, "user-b").await;

        let body: Value = server
            .get("/api/admin/reports")
            .authorization_bearer(admin_token("admin-1"))
            .await
            .json();

        let reports = body["data"].as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["image_count"], json!(1));
        assert!(reports[0]["first_image_preview"]["content_type"].is_string());
    }

    #[tokio::test]
    async fn test_admin_can_fetch_any_owners_image() {
        let server = server();

        let id = submit_as(&server, "user-a").await;

        let res = server
            .get(&format!("/api/admin/reports/{}/images/0", id))
            .authorization_bearer(admin_token("admin-1"))
            .await;

        res.assert_status(StatusCode::OK);
        let disposition = res
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("sampah.png"));
    }

    #[tokio::test]
    async fn test_update_status_valid_and_invalid() {
        let server = server();

        let id = submit_as(&server, "user-a").await;

        let res = server
            .patch(&format!("/api/admin/reports/{}/status", id))
            .authorization_bearer(admin_token("admin-1"))
            .json(&json!({ "status": "in_progress" }))
            .await;
        res.assert_status(StatusCode::OK);
        assert_eq!(res.json::<Value>()["data"]["status"], json!("in_progress"));

        let res = server
            .patch(&format!("/api/admin/reports/{}/status", id))
            .authorization_bearer(admin_token("admin-1"))
            .json(&json!({ "status": "archived" }))
            .await;
        res.assert_status(StatusCode::BAD_REQUEST);

        // prior status is untouched by the rejected update
        let detail: Value = server
            .get(&format!("/api/admin/reports/{}", id))
            .authorization_bearer(admin_token("admin-1"))
            .await
            .json();
        assert_eq!(detail["data"]["status"], json!("in_progress"));
    }

    #[tokio::test]
    async fn test_update_status_missing_report_is_404() {
        let server = server();

        let res = server
            .patch(&format!("/api/admin/reports/{}/status", Uuid::new_v4()))
            .authorization_bearer(admin_token("admin-1"))
            .json(&json!({ "status": "resolved" }))
            .await;
        res.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_stats_shape() {
        let server = server();

        let id = submit_as(&server, "user-a").await;
        submit_as(&server, "user-b").await;

        server
            .patch(&format!("/api/admin/reports/{}/status", id))
            .authorization_bearer(admin_token("admin-1"))
            .json(&json!({ "status": "resolved" }))
            .await
            .assert_status(StatusCode::OK);

        let body: Value = server
            .get("/api/admin/dashboard/stats")
            .authorization_bearer(admin_token("admin-1"))
            .await
            .json();

        assert_eq!(body["data"]["stats"]["total_reports"], json!(2));
        assert_eq!(body["data"]["stats"]["pending_reports"], json!(1));
        assert_eq!(body["data"]["stats"]["resolved_reports"], json!(1));
        assert_eq!(body["data"]["recent_reports"].as_array().unwrap().len(), 2);
    }
}
