use std::str::FromStr;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{
    AdminReportDetailDto, AdminReportSummaryDto, DashboardCountsDto, DashboardStatsDto,
    ImagePreviewDto,
};
use crate::features::reports::dtos::{CoordinatesResponseDto, ImageLinkDto, LocationDto};
use crate::features::reports::models::{Report, ReportImageMeta, ReportStatus};
use crate::features::reports::repository::ReportRepository;
use crate::features::reports::services::report_service::decode_stored_image;
use crate::shared::constants::DASHBOARD_RECENT_REPORTS;

/// Service for admin review and triage.
///
/// Same retrieval contracts as the owner-facing service minus the ownership
/// predicate; the role gate lives in the route guards.
pub struct AdminService {
    repo: Arc<dyn ReportRepository>,
}

impl AdminService {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    /// All reports, newest first, with image counts and first-image previews
    pub async fn list_reports(&self) -> Result<Vec<AdminReportSummaryDto>> {
        let reports = self.repo.list_all().await?;
        self.summarize(reports).await
    }

    /// Full report detail with per-image metadata
    pub async fn get_report(&self, id: Uuid) -> Result<AdminReportDetailDto> {
        let report = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let images = self.repo.images_meta(id).await?;
        Ok(detail_from_parts(report, images))
    }

    /// Addressable links for each image of a report
    pub async fn image_links(&self, id: Uuid) -> Result<Vec<ImageLinkDto>> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let images = self.repo.images_meta(id).await?;
        Ok(images
            .into_iter()
            .map(|m| ImageLinkDto {
                index: m.position,
                url: format!("/api/admin/reports/{}/images/{}", id, m.position),
                content_type: m.content_type,
                filename: m.filename,
            })
            .collect())
    }

    /// Decoded image bytes by report and index, any owner
    pub async fn get_image(&self, id: Uuid, index: i32) -> Result<(Vec<u8>, String, String)> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        decode_stored_image(self.repo.as_ref(), id, index).await
    }

    /// Set a report's status.
    ///
    /// Only the four recognized values are accepted; transitions themselves
    /// are unconstrained (any status may follow any other).
    pub async fn set_status(&self, id: Uuid, status: &str) -> Result<AdminReportDetailDto> {
        let status = ReportStatus::from_str(status)?;

        let report = self
            .repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        info!("Report {} status set to {}", id, status);

        let images = self.repo.images_meta(id).await?;
        Ok(detail_from_parts(report, images))
    }

    /// Dashboard statistics: counters plus the most recent reports
    pub async fn dashboard_stats(&self) -> Result<DashboardStatsDto> {
        let counts = self.repo.status_counts().await?;
        let recent = self.repo.recent(DASHBOARD_RECENT_REPORTS).await?;
        let recent_reports = self.summarize(recent).await?;

        Ok(DashboardStatsDto {
            stats: DashboardCountsDto {
                total_reports: counts.total,
                pending_reports: counts.pending,
                resolved_reports: counts.resolved,
            },
            recent_reports,
        })
    }

    async fn summarize(&self, reports: Vec<Report>) -> Result<Vec<AdminReportSummaryDto>> {
        let mut summaries = Vec::with_capacity(reports.len());
        for report in reports {
            let images = self.repo.images_meta(report.id).await?;
            summaries.push(summary_from_parts(report, images));
        }
        Ok(summaries)
    }
}

fn location_of(report: &Report) -> LocationDto {
    LocationDto {
        address: report.address.clone(),
        coordinates: CoordinatesResponseDto {
            latitude: report.latitude,
            longitude: report.longitude,
            accuracy: report.accuracy,
        },
    }
}

fn summary_from_parts(report: Report, images: Vec<ReportImageMeta>) -> AdminReportSummaryDto {
    let location = location_of(&report);
    let first_image_preview = images.first().map(|m| ImagePreviewDto {
        content_type: m.content_type.clone(),
        filename: m.filename.clone(),
        size_bytes: m.size_bytes,
    });

    AdminReportSummaryDto {
        id: report.id,
        description: report.description,
        category: report.category,
        location,
        owner_id: report.owner_id,
        status: report.status,
        image_count: images.len(),
        first_image_preview,
        created_at: report.created_at,
    }
}

fn detail_from_parts(report: Report, images: Vec<ReportImageMeta>) -> AdminReportDetailDto {
    let location = location_of(&report);

    AdminReportDetailDto {
        id: report.id,
        description: report.description,
        category: report.category,
        location,
        owner_id: report.owner_id,
        status: report.status,
        images: images.into_iter().map(|m| m.into()).collect(),
        created_at: report.created_at,
        updated_at: report.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::{default_categories, CategoryRegistry};
    use crate::features::reports::services::ReportService;
    use crate::shared::test_helpers::{valid_report_dto, InMemoryReportRepository};

    fn services() -> (ReportService, AdminService) {
        let repo = Arc::new(InMemoryReportRepository::new());
        let report_service = ReportService::new(
            Arc::clone(&repo) as Arc<dyn ReportRepository>,
            Arc::new(CategoryRegistry::new(default_categories())),
        );
        let admin_service = AdminService::new(repo);
        (report_service, admin_service)
    }

    #[tokio::test]
    async fn test_admin_sees_all_reports() {
        let (report_service, admin_service) = services();

        report_service
            .submit("user-a", valid_report_dto())
            .await
            .unwrap();
        report_service
            .submit("user-b", valid_report_dto())
            .await
            .unwrap();

        let all = admin_service.list_reports().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].image_count, 1);
        assert!(all[0].first_image_preview.is_some());
    }

    #[tokio::test]
    async fn test_set_status_accepts_all_recognized_values() {
        let (report_service, admin_service) = services();

        let report = report_service
            .submit("user-a", valid_report_dto())
            .await
            .unwrap();

        for status in ["in_progress", "resolved", "rejected", "pending"] {
            let updated = admin_service.set_status(report.id, status).await.unwrap();
            assert_eq!(updated.status.to_string(), status);
        }
    }

    #[tokio::test]
    async fn test_set_status_rejects_unrecognized_and_keeps_prior() {
        let (report_service, admin_service) = services();

        let report = report_service
            .submit("user-a", valid_report_dto())
            .await
            .unwrap();
        admin_service
            .set_status(report.id, "in_progress")
            .await
            .unwrap();

        let err = admin_service
            .set_status(report.id, "archived")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let detail = admin_service.get_report(report.id).await.unwrap();
        assert_eq!(detail.status, ReportStatus::InProgress);
    }

    #[tokio::test]
    async fn test_set_status_missing_report_is_not_found() {
        let (_, admin_service) = services();

        let err = admin_service
            .set_status(Uuid::new_v4(), "resolved")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_dashboard_stats_counts_and_recent() {
        let (report_service, admin_service) = services();

        let first = report_service
            .submit("user-a", valid_report_dto())
            .await
            .unwrap();
        report_service
            .submit("user-b", valid_report_dto())
            .await
            .unwrap();
        admin_service
            .set_status(first.id, "resolved")
            .await
            .unwrap();

        let stats = admin_service.dashboard_stats().await.unwrap();
        assert_eq!(stats.stats.total_reports, 2);
        assert_eq!(stats.stats.pending_reports, 1);
        assert_eq!(stats.stats.resolved_reports, 1);
        assert_eq!(stats.recent_reports.len(), 2);
    }

    #[tokio::test]
    async fn test_admin_get_image_ignores_ownership() {
        let (report_service, admin_service) = services();

        let report = report_service
            .submit("user-a", valid_report_dto())
            .await
            .unwrap();

        let (bytes, content_type, filename) =
            admin_service.get_image(report.id, 0).await.unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(content_type, "image/png");
        assert_eq!(filename, "photo.png");
    }
}
