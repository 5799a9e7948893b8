use std::sync::Arc;

use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{ProcessedImageDto, MAX_UPLOAD_FILES};
use crate::modules::imaging;
use crate::modules::storage::LocalDiskStore;
use crate::shared::constants::{ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE_BYTES};

/// One uploaded multipart file, read into memory
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Service for the standalone image upload pipeline.
///
/// Each file runs validate -> normalize -> store; the whole batch is rejected
/// on the first invalid file, before anything of it is written.
pub struct UploadService {
    store: Arc<LocalDiskStore>,
}

impl UploadService {
    pub fn new(store: Arc<LocalDiskStore>) -> Self {
        Self { store }
    }

    pub async fn process_images(
        &self,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<ProcessedImageDto>> {
        if files.is_empty() {
            return Err(AppError::BadRequest("No files uploaded".to_string()));
        }

        if files.len() > MAX_UPLOAD_FILES {
            return Err(AppError::BadRequest(format!(
                "At most {} files per upload",
                MAX_UPLOAD_FILES
            )));
        }

        // Reject the batch up front so no partial set is stored
        for file in &files {
            if !ALLOWED_IMAGE_TYPES.contains(&file.content_type.as_str()) {
                return Err(AppError::Validation(format!(
                    "Invalid file type: {}",
                    file.filename
                )));
            }

            if file.data.len() > MAX_IMAGE_SIZE_BYTES {
                return Err(AppError::Validation(format!(
                    "File too large: {} (max {} MB)",
                    file.filename,
                    MAX_IMAGE_SIZE_BYTES / 1024 / 1024
                )));
            }

            if !imaging::validate(&file.data) {
                return Err(AppError::Validation(format!(
                    "Invalid image: {}",
                    file.filename
                )));
            }
        }

        let mut processed = Vec::with_capacity(files.len());
        for file in files {
            let normalized = imaging::normalize(&file.data)?;
            let size_bytes = normalized.len() as i64;

            // Normalized output is always JPEG
            let stored_name = self.store.save(&normalized, "jpg").await?;

            processed.push(ProcessedImageDto {
                url: self.store.url_for(&stored_name),
                filename: stored_name,
                original_name: file.filename,
                size_bytes,
            });
        }

        info!("Processed {} uploaded image(s)", processed.len());
        Ok(processed)
    }
}
