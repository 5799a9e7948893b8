use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::dtos::{ImageMetaDto, LocationDto};
use crate::features::reports::models::ReportStatus;

/// Metadata preview of a report's first image
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImagePreviewDto {
    pub content_type: String,
    pub filename: String,
    pub size_bytes: i64,
}

/// Admin list entry: report with image count and first-image preview
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminReportSummaryDto {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub location: LocationDto,
    pub owner_id: String,
    pub status: ReportStatus,
    pub image_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_image_preview: Option<ImagePreviewDto>,
    pub created_at: DateTime<Utc>,
}

/// Admin detail view: full report fields with per-image metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminReportDetailDto {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub location: LocationDto,
    pub owner_id: String,
    pub status: ReportStatus,
    pub images: Vec<ImageMetaDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for updating report status.
///
/// The status travels as a plain string so an unrecognized value yields a
/// field-level validation error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    pub status: String,
}

/// Aggregate counters for the dashboard header
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardCountsDto {
    pub total_reports: i64,
    pub pending_reports: i64,
    pub resolved_reports: i64,
}

/// Dashboard statistics: counters plus the most recent reports
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStatsDto {
    pub stats: DashboardCountsDto,
    pub recent_reports: Vec<AdminReportSummaryDto>,
}
