use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    CreateReportDto, CreatedReportDto, ImageLinkDto, ReportDetailDto, ReportSummaryDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::constants::IMAGE_CACHE_CONTROL;
use crate::shared::types::ApiResponse;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
}

/// Submit a new report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<CreatedReportDto>),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedReportDto>>)> {
    let report = state.report_service.submit(&user.id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report.into()),
            Some("Report created successfully".to_string()),
            None,
        )),
    ))
}

/// List reports owned by the authenticated user (image payloads excluded)
#[utoipa::path(
    get,
    path = "/api/reports/my-reports",
    responses(
        (status = 200, description = "List of the user's reports", body = ApiResponse<Vec<ReportSummaryDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_my_reports(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<Vec<ReportSummaryDto>>>> {
    let reports = state.report_service.list_own(&user.id).await?;
    Ok(Json(ApiResponse::success(Some(reports), None, None)))
}

/// Get a single owned report with its images
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<ReportDetailDto>>> {
    let report = state.report_service.get_own(&user.id, id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// List image links for an owned report
#[utoipa::path(
    get,
    path = "/api/reports/{id}/images",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Image links", body = ApiResponse<Vec<ImageLinkDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_report_images(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<Vec<ImageLinkDto>>>> {
    let links = state.report_service.image_links(&user.id, id).await?;
    Ok(Json(ApiResponse::success(Some(links), None, None)))
}

/// Serve one image of an owned report as binary
#[utoipa::path(
    get,
    path = "/api/reports/{id}/images/{index}",
    params(
        ("id" = Uuid, Path, description = "Report ID"),
        ("index" = i32, Path, description = "Zero-based image index")
    ),
    responses(
        (status = 200, description = "Image bytes", body = Vec<u8>, content_type = "image/jpeg"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report or image not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report_image(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path((id, index)): Path<(uuid::Uuid, i32)>,
) -> Result<Response> {
    let (bytes, content_type, _filename) =
        state.report_service.get_image(&user.id, id, index).await?;

    image_response(bytes, &content_type, None)
}

/// Build a binary image response with explicit length and cache headers.
pub(crate) fn image_response(
    bytes: Vec<u8>,
    content_type: &str,
    inline_filename: Option<&str>,
) -> Result<Response> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(header::CACHE_CONTROL, IMAGE_CACHE_CONTROL);

    if let Some(filename) = inline_filename {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", filename),
        );
    }

    builder
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build image response: {}", e)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::{
        png_data_uri, test_app, user_token, InMemoryReportRepository,
    };

    fn server() -> TestServer {
        TestServer::new(test_app(Arc::new(InMemoryReportRepository::new()))).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "description": "Jalan berlubang cukup dalam di depan halte, sudah seminggu belum diperbaiki.",
            "category": "jalan",
            "location": "Jl. Sudirman",
            "coordinates": { "latitude": -6.2, "longitude": 106.8 },
            "images": [{
                "data": png_data_uri(64, 64),
                "content_type": "image/png",
                "filename": "photo.png"
            }]
        })
    }

    #[tokio::test]
    async fn test_submit_report_returns_201_pending() {
        let server = server();

        let res = server
            .post("/api/reports")
            .authorization_bearer(user_token("user-1"))
            .json(&valid_body())
            .await;

        res.assert_status(StatusCode::CREATED);
        let body: Value = res.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["status"], json!("pending"));
        assert!(body["data"]["id"].is_string());
        assert!(body["data"]["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_submit_without_token_is_401() {
        let server = server();

        let res = server.post("/api/reports").json(&valid_body()).await;
        res.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_submit_short_description_is_400() {
        let server = server();

        let mut body = valid_body();
        body["description"] = json!("too short");

        let res = server
            .post("/api/reports")
            .authorization_bearer(user_token("user-1"))
            .json(&body)
            .await;

        res.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = res.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_my_reports_scoped_to_principal() {
        let server = server();

        let res = server
            .post("/api/reports")
            .authorization_bearer(user_token("user-a"))
            .json(&valid_body())
            .await;
        let id = res.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

        let own: Value = server
            .get("/api/reports/my-reports")
            .authorization_bearer(user_token("user-a"))
            .await
            .json();
        let entries = own["data"].as_array().unwrap();
        assert!(entries.iter().any(|r| r["id"] == json!(id)));
        // payload bytes are excluded from summaries
        assert!(entries[0]["images"][0].get("data").is_none());

        let other: Value = server
            .get("/api/reports/my-reports")
            .authorization_bearer(user_token("user-b"))
            .await
            .json();
        assert!(other["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_report_reads_as_404() {
        let server = server();

        let res = server
            .post("/api/reports")
            .authorization_bearer(user_token("user-a"))
            .json(&valid_body())
            .await;
        let id = res.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

        let res = server
            .get(&format!("/api/reports/{}", id))
            .authorization_bearer(user_token("user-b"))
            .await;
        res.assert_status(StatusCode::NOT_FOUND);

        let res = server
            .get(&format!("/api/reports/{}/images/0", id))
            .authorization_bearer(user_token("user-b"))
            .await;
        res.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_image_bytes_response_headers() {
        let server = server();

        let res = server
            .post("/api/reports")
            .authorization_bearer(user_token("user-1"))
            .json(&valid_body())
            .await;
        let id = res.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

        let res = server
            .get(&format!("/api/reports/{}/images/0", id))
            .authorization_bearer(user_token("user-1"))
            .await;

        res.assert_status(StatusCode::OK);
        let headers = res.headers();
        assert_eq!(headers.get("content-type").unwrap(), "image/png");
        assert_eq!(
            headers.get("cache-control").unwrap(),
            "public, max-age=86400"
        );
        let bytes = res.as_bytes().to_vec();
        assert_eq!(
            headers.get("content-length").unwrap().to_str().unwrap(),
            bytes.len().to_string()
        );
        assert!(image::load_from_memory(&bytes).is_ok());

        // image index outside [0, count) is a 404
        let res = server
            .get(&format!("/api/reports/{}/images/5", id))
            .authorization_bearer(user_token("user-1"))
            .await;
        res.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_image_links_listing() {
        let server = server();

        let res = server
            .post("/api/reports")
            .authorization_bearer(user_token("user-1"))
            .json(&valid_body())
            .await;
        let id = res.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

        let body: Value = server
            .get(&format!("/api/reports/{}/images", id))
            .authorization_bearer(user_token("user-1"))
            .await
            .json();

        let links = body["data"].as_array().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0]["index"], json!(0));
        assert_eq!(
            links[0]["url"],
            json!(format!("/api/reports/{}/images/0", id))
        );
        assert_eq!(links[0]["content_type"], json!("image/png"));
    }
}
