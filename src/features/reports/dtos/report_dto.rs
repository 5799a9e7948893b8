use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::{Report, ReportImage, ReportImageMeta, ReportStatus};

/// Request DTO for submitting a report.
///
/// All fields are optional at the serde level so the service can report a
/// precise, per-field message instead of a generic deserialization error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReportDto {
    pub description: Option<String>,
    pub category: Option<String>,
    /// Street address of the incident
    pub location: Option<String>,
    pub coordinates: Option<CoordinatesDto>,
    pub images: Option<Vec<ImagePayloadDto>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CoordinatesDto {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
}

/// One inline image in a submission
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImagePayloadDto {
    /// Base64 data URI (`data:image/...;base64,...`)
    pub data: Option<String>,
    #[serde(alias = "contentType")]
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

/// Response DTO for a successful submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedReportDto {
    pub id: Uuid,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for CreatedReportDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

/// Response DTO for report location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub address: String,
    pub coordinates: CoordinatesResponseDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoordinatesResponseDto {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// Image metadata for list views (payload bytes excluded)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageMetaDto {
    pub index: i32,
    pub content_type: String,
    pub filename: String,
    pub size_bytes: i64,
}

impl From<ReportImageMeta> for ImageMetaDto {
    fn from(m: ReportImageMeta) -> Self {
        Self {
            index: m.position,
            content_type: m.content_type,
            filename: m.filename,
            size_bytes: m.size_bytes,
        }
    }
}

/// Full image entry including the encoded payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageDto {
    pub index: i32,
    /// Base64 data URI payload
    pub data: String,
    pub content_type: String,
    pub filename: String,
    pub size_bytes: i64,
}

impl From<ReportImage> for ImageDto {
    fn from(i: ReportImage) -> Self {
        Self {
            index: i.position,
            data: i.encoded_data,
            content_type: i.content_type,
            filename: i.filename,
            size_bytes: i.size_bytes,
        }
    }
}

/// Report summary for list views - image metadata only
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSummaryDto {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub location: LocationDto,
    pub status: ReportStatus,
    pub images: Vec<ImageMetaDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportSummaryDto {
    pub fn from_parts(report: Report, images: Vec<ReportImageMeta>) -> Self {
        Self {
            id: report.id,
            description: report.description,
            category: report.category,
            location: LocationDto {
                address: report.address,
                coordinates: CoordinatesResponseDto {
                    latitude: report.latitude,
                    longitude: report.longitude,
                    accuracy: report.accuracy,
                },
            },
            status: report.status,
            images: images.into_iter().map(|m| m.into()).collect(),
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

/// Full report including encoded image payloads (single-report view)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDetailDto {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub location: LocationDto,
    pub status: ReportStatus,
    pub images: Vec<ImageDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportDetailDto {
    pub fn from_parts(report: Report, images: Vec<ReportImage>) -> Self {
        Self {
            id: report.id,
            description: report.description,
            category: report.category,
            location: LocationDto {
                address: report.address,
                coordinates: CoordinatesResponseDto {
                    latitude: report.latitude,
                    longitude: report.longitude,
                    accuracy: report.accuracy,
                },
            },
            status: report.status,
            images: images.into_iter().map(|i| i.into()).collect(),
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

/// Addressable image link for the image-list endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageLinkDto {
    pub index: i32,
    pub url: String,
    pub content_type: String,
    pub filename: String,
}
