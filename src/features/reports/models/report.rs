use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::InProgress => write!(f, "in_progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
            ReportStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "in_progress" => Ok(ReportStatus::InProgress),
            "resolved" => Ok(ReportStatus::Resolved),
            "rejected" => Ok(ReportStatus::Rejected),
            other => Err(AppError::Validation(format!(
                "Invalid status '{}'. Expected one of: pending, in_progress, resolved, rejected",
                other
            ))),
        }
    }
}

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub owner_id: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for a report image, payload included
#[derive(Debug, Clone, FromRow)]
pub struct ReportImage {
    pub position: i32,
    /// Self-describing encoded payload (`data:image/...;base64,...`)
    pub encoded_data: String,
    pub content_type: String,
    pub filename: String,
    pub size_bytes: i64,
}

/// Image metadata row without the encoded payload, for list views
#[derive(Debug, Clone, FromRow)]
pub struct ReportImageMeta {
    pub position: i32,
    pub content_type: String,
    pub filename: String,
    pub size_bytes: i64,
}

/// Data for creating a new report with its full image sequence
#[derive(Debug, Clone)]
pub struct NewReport {
    pub description: String,
    pub category: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub owner_id: String,
    pub images: Vec<NewReportImage>,
}

#[derive(Debug, Clone)]
pub struct NewReportImage {
    pub encoded_data: String,
    pub content_type: String,
    pub filename: String,
    pub size_bytes: i64,
}

/// Report counts by status for the admin dashboard
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct StatusCounts {
    pub total: i64,
    pub pending: i64,
    pub resolved: i64,
}
