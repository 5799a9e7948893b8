use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum number of files per upload request
pub const MAX_UPLOAD_FILES: usize = 5;

/// Upload request DTO for OpenAPI documentation.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImagesDto {
    /// Image files to process (field name `images`, up to 5)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub images: String,
}

/// One processed image stored under a generated name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessedImageDto {
    /// Generated filename the image is stored under
    pub filename: String,
    /// Client-supplied filename
    pub original_name: String,
    /// Size of the normalized image in bytes
    pub size_bytes: i64,
    /// Public URL the image is served from
    pub url: String,
}
