//! Local disk storage for processed upload images.
//!
//! Files are addressed by a generated name (`<uuid>.<ext>`) and served
//! statically under the configured public base path.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::UploadConfig;
use crate::core::error::AppError;

pub struct LocalDiskStore {
    root: PathBuf,
    public_base: String,
}

impl LocalDiskStore {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            root: PathBuf::from(config.dir),
            public_base: config.public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Ensure the upload directory exists, create if not
    pub async fn ensure_root_exists(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        info!("Upload directory ready: {}", self.root.display());
        Ok(())
    }

    /// Write a file under a generated name and return that name.
    pub async fn save(&self, data: &[u8], extension: &str) -> Result<String, AppError> {
        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(format!("Failed to write file '{}': {}", path.display(), e))
        })?;

        debug!("Stored upload '{}' ({} bytes)", filename, data.len());
        Ok(filename)
    }

    /// Public URL path for a stored file
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.public_base, filename)
    }

    /// Directory files are written to (used to mount static serving)
    pub fn root(&self) -> &Path {
        &self.root
    }
}
