//! Report persistence behind an injected repository trait.
//!
//! The service layer only sees `ReportRepository`, so tests can swap in an
//! in-memory store and the Postgres implementation stays a detail of wiring.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    NewReport, Report, ReportImage, ReportImageMeta, ReportStatus, StatusCounts,
};

const REPORT_COLUMNS: &str = "id, description, category, address, latitude, longitude, accuracy, \
     owner_id, status, created_at, updated_at";

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a report together with its full image sequence, atomically.
    async fn insert(&self, new_report: NewReport) -> Result<Report>;

    /// Reports owned by a principal, newest first
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Report>>;

    /// Lookup with the ownership check inside the predicate, so a foreign
    /// report is indistinguishable from a missing one.
    async fn find_owned(&self, id: Uuid, owner_id: &str) -> Result<Option<Report>>;

    /// Unscoped lookup for admin access
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>>;

    /// All reports, newest first
    async fn list_all(&self) -> Result<Vec<Report>>;

    /// Persist a new status; returns the updated report, or None when the id
    /// does not resolve. Last write wins - no version check.
    async fn update_status(&self, id: Uuid, status: ReportStatus) -> Result<Option<Report>>;

    /// Image metadata for a report, ordered by position (no payloads)
    async fn images_meta(&self, report_id: Uuid) -> Result<Vec<ReportImageMeta>>;

    /// All images for a report with payloads, ordered by position
    async fn images(&self, report_id: Uuid) -> Result<Vec<ReportImage>>;

    /// Single image with payload by zero-based position
    async fn image_at(&self, report_id: Uuid, index: i32) -> Result<Option<ReportImage>>;

    /// Report counts for the admin dashboard
    async fn status_counts(&self) -> Result<StatusCounts>;

    /// Most recent reports, newest first
    async fn recent(&self, limit: i64) -> Result<Vec<Report>>;
}

/// Postgres-backed repository
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, new_report: NewReport) -> Result<Report> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let report = sqlx::query_as::<_, Report>(&format!(
            "INSERT INTO reports (description, category, address, latitude, longitude, accuracy, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(&new_report.description)
        .bind(&new_report.category)
        .bind(&new_report.address)
        .bind(new_report.latitude)
        .bind(new_report.longitude)
        .bind(new_report.accuracy)
        .bind(&new_report.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })?;

        for (position, image) in new_report.images.iter().enumerate() {
            sqlx::query(
                "INSERT INTO report_images (report_id, position, encoded_data, content_type, filename, size_bytes) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(report.id)
            .bind(position as i32)
            .bind(&image.encoded_data)
            .bind(&image.content_type)
            .bind(&image.filename)
            .bind(image.size_bytes)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert report image: {:?}", e);
                AppError::Database(e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit report insert: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(report)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports by owner: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_owned(&self, id: Uuid, owner_id: &str) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch report: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch report: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_all(&self) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_status(&self, id: Uuid, status: ReportStatus) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            "UPDATE reports SET status = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report status: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn images_meta(&self, report_id: Uuid) -> Result<Vec<ReportImageMeta>> {
        sqlx::query_as::<_, ReportImageMeta>(
            "SELECT position, content_type, filename, size_bytes \
             FROM report_images WHERE report_id = $1 ORDER BY position",
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list report image metadata: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn images(&self, report_id: Uuid) -> Result<Vec<ReportImage>> {
        sqlx::query_as::<_, ReportImage>(
            "SELECT position, encoded_data, content_type, filename, size_bytes \
             FROM report_images WHERE report_id = $1 ORDER BY position",
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list report images: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn image_at(&self, report_id: Uuid, index: i32) -> Result<Option<ReportImage>> {
        sqlx::query_as::<_, ReportImage>(
            "SELECT position, encoded_data, content_type, filename, size_bytes \
             FROM report_images WHERE report_id = $1 AND position = $2",
        )
        .bind(report_id)
        .bind(index)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch report image: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn status_counts(&self) -> Result<StatusCounts> {
        sqlx::query_as::<_, StatusCounts>(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
                    COUNT(*) FILTER (WHERE status = 'resolved') AS resolved \
             FROM reports",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list recent reports: {:?}", e);
            AppError::Database(e)
        })
    }
}
