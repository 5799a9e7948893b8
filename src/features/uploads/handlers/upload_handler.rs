use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::uploads::dtos::{ProcessedImageDto, UploadImagesDto};
use crate::features::uploads::services::{UploadService, UploadedFile};
use crate::shared::types::ApiResponse;

/// Upload and process images
///
/// Accepts multipart/form-data with one or more `images` fields. Each file is
/// validated, resized to fit 1920px and re-encoded before being stored under
/// a generated name.
#[utoipa::path(
    post,
    path = "/api/upload/images",
    tag = "uploads",
    request_body(
        content = UploadImagesDto,
        content_type = "multipart/form-data",
        description = "Image files under the `images` field"
    ),
    responses(
        (status = 200, description = "Images processed", body = ApiResponse<Vec<ProcessedImageDto>>),
        (status = 400, description = "Invalid or missing files"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_images(
    _user: AuthenticatedUser,
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Vec<ProcessedImageDto>>>> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name != "images" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        files.push(UploadedFile {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }

    let processed = service.process_images(files).await?;
    Ok(Json(ApiResponse::success(Some(processed), None, None)))
}
