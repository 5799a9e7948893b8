use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::CategoryRegistry;
use crate::features::reports::dtos::{
    CreateReportDto, ImageLinkDto, ReportDetailDto, ReportSummaryDto,
};
use crate::features::reports::models::{NewReport, NewReportImage, Report};
use crate::features::reports::repository::ReportRepository;
use crate::modules::imaging::EncodedImage;
use crate::shared::constants::{
    ALLOWED_IMAGE_TYPES, MAX_IMAGES_PER_REPORT, MAX_IMAGE_SIZE_BYTES, MIN_DESCRIPTION_LENGTH,
};

/// Service for citizen report submission and owner-scoped retrieval
pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
    categories: Arc<CategoryRegistry>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepository>, categories: Arc<CategoryRegistry>) -> Self {
        Self { repo, categories }
    }

    /// Submit a new report.
    ///
    /// Checks run in a fixed order and short-circuit on the first failure so
    /// the client gets one precise, field-level message. Nothing is persisted
    /// unless every check passes; the insert itself is a single transaction.
    pub async fn submit(&self, owner_id: &str, dto: CreateReportDto) -> Result<Report> {
        let description = dto
            .description
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Description is required".to_string()))?;

        let category = dto
            .category
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Category is required".to_string()))?;
        if !self.categories.contains(&category) {
            return Err(AppError::Validation(format!(
                "Unknown category '{}'",
                category
            )));
        }

        let address = dto
            .location
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Location is required".to_string()))?;

        let coordinates = dto
            .coordinates
            .ok_or_else(|| AppError::Validation("Coordinates are required".to_string()))?;
        let latitude = coordinates
            .latitude
            .ok_or_else(|| AppError::Validation("Latitude is required".to_string()))?;
        let longitude = coordinates
            .longitude
            .ok_or_else(|| AppError::Validation("Longitude is required".to_string()))?;

        let images = dto
            .images
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation("At least one image is required".to_string()))?;

        if description.chars().count() < MIN_DESCRIPTION_LENGTH {
            return Err(AppError::Validation(format!(
                "Description must be at least {} characters",
                MIN_DESCRIPTION_LENGTH
            )));
        }

        if images.len() > MAX_IMAGES_PER_REPORT {
            return Err(AppError::Validation(format!(
                "A report can have at most {} images",
                MAX_IMAGES_PER_REPORT
            )));
        }

        let mut new_images = Vec::with_capacity(images.len());
        for (i, image) in images.into_iter().enumerate() {
            let number = i + 1;

            let data = image.data.filter(|s| !s.is_empty()).ok_or_else(|| {
                AppError::Validation(format!("Image {}: data is required", number))
            })?;
            let content_type = image.content_type.filter(|s| !s.is_empty()).ok_or_else(|| {
                AppError::Validation(format!("Image {}: content type is required", number))
            })?;
            let filename = image.filename.filter(|s| !s.is_empty()).ok_or_else(|| {
                AppError::Validation(format!("Image {}: filename is required", number))
            })?;

            let encoded = EncodedImage::parse(&data).map_err(|e| match e {
                AppError::Validation(msg) => {
                    AppError::Validation(format!("Image {}: {}", number, msg))
                }
                other => other,
            })?;

            if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
                return Err(AppError::Validation(format!(
                    "Image {}: content type '{}' is not allowed",
                    number, content_type
                )));
            }

            if encoded.size() > MAX_IMAGE_SIZE_BYTES {
                return Err(AppError::Validation(format!(
                    "Image {}: exceeds the maximum size of {} MB",
                    number,
                    MAX_IMAGE_SIZE_BYTES / 1024 / 1024
                )));
            }

            let size_bytes = encoded.size() as i64;
            new_images.push(NewReportImage {
                // Store the canonical re-encoding, not the raw client string
                encoded_data: encoded.to_data_uri(),
                content_type,
                filename,
                size_bytes,
            });
        }

        let report = self
            .repo
            .insert(NewReport {
                description,
                category,
                address,
                latitude,
                longitude,
                accuracy: coordinates.accuracy,
                owner_id: owner_id.to_string(),
                images: new_images,
            })
            .await?;

        info!("Report {} submitted by {}", report.id, owner_id);
        Ok(report)
    }

    /// Reports owned by the principal, newest first, image payloads excluded
    pub async fn list_own(&self, owner_id: &str) -> Result<Vec<ReportSummaryDto>> {
        let reports = self.repo.list_by_owner(owner_id).await?;

        let mut summaries = Vec::with_capacity(reports.len());
        for report in reports {
            let images = self.repo.images_meta(report.id).await?;
            summaries.push(ReportSummaryDto::from_parts(report, images));
        }

        Ok(summaries)
    }

    /// Full report by id, owner-scoped.
    ///
    /// The ownership check is part of the lookup predicate - a report owned
    /// by someone else reads as NotFound, never Forbidden.
    pub async fn get_own(&self, owner_id: &str, id: Uuid) -> Result<ReportDetailDto> {
        let report = self
            .repo
            .find_owned(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let images = self.repo.images(id).await?;
        Ok(ReportDetailDto::from_parts(report, images))
    }

    /// Addressable links for each image of an owned report
    pub async fn image_links(&self, owner_id: &str, id: Uuid) -> Result<Vec<ImageLinkDto>> {
        self.repo
            .find_owned(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let images = self.repo.images_meta(id).await?;
        Ok(images
            .into_iter()
            .map(|m| ImageLinkDto {
                index: m.position,
                url: format!("/api/reports/{}/images/{}", id, m.position),
                content_type: m.content_type,
                filename: m.filename,
            })
            .collect())
    }

    /// Decoded image bytes by report and index, owner-scoped.
    ///
    /// Returns (bytes, content_type, filename). A pure decode of the stored
    /// payload - repeated calls yield byte-identical output.
    pub async fn get_image(
        &self,
        owner_id: &str,
        id: Uuid,
        index: i32,
    ) -> Result<(Vec<u8>, String, String)> {
        self.repo
            .find_owned(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        decode_stored_image(self.repo.as_ref(), id, index).await
    }
}

/// Fetch and decode one stored image; shared by owner and admin paths.
pub(crate) async fn decode_stored_image(
    repo: &dyn ReportRepository,
    report_id: Uuid,
    index: i32,
) -> Result<(Vec<u8>, String, String)> {
    if index < 0 {
        return Err(AppError::NotFound("Image not found".to_string()));
    }

    let image = repo
        .image_at(report_id, index)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    // A stored payload that fails to decode is a storage fault, not bad input
    let encoded = EncodedImage::parse(&image.encoded_data).map_err(|e| {
        AppError::Internal(format!(
            "Stored image {} of report {} is unreadable: {}",
            index, report_id, e
        ))
    })?;

    Ok((encoded.bytes, image.content_type, image.filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::default_categories;
    use crate::features::reports::dtos::{CoordinatesDto, ImagePayloadDto};
    use crate::features::reports::models::ReportStatus;
    use crate::shared::test_helpers::{
        png_data_uri, valid_report_dto, InMemoryReportRepository,
    };

    fn service_with(repo: Arc<InMemoryReportRepository>) -> ReportService {
        ReportService::new(repo, Arc::new(CategoryRegistry::new(default_categories())))
    }

    fn service() -> (ReportService, Arc<InMemoryReportRepository>) {
        let repo = Arc::new(InMemoryReportRepository::new());
        (service_with(Arc::clone(&repo)), repo)
    }

    #[tokio::test]
    async fn test_submit_valid_report_is_pending() {
        let (service, repo) = service();

        let report = service.submit("user-1", valid_report_dto()).await.unwrap();

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.owner_id, "user-1");
        assert_eq!(repo.report_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_short_description_persists_nothing() {
        let (service, repo) = service();

        let dto = CreateReportDto {
            description: Some("too short".to_string()),
            ..valid_report_dto()
        };
        let err = service.submit("user-1", dto).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("50 characters")));
        assert_eq!(repo.report_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_missing_fields_report_first_failure() {
        let (service, _) = service();

        let err = service
            .submit(
                "user-1",
                CreateReportDto {
                    description: None,
                    ..valid_report_dto()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("Description")));

        let err = service
            .submit(
                "user-1",
                CreateReportDto {
                    coordinates: Some(CoordinatesDto {
                        latitude: None,
                        longitude: Some(106.8),
                        accuracy: None,
                    }),
                    ..valid_report_dto()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("Latitude")));
    }

    #[tokio::test]
    async fn test_submit_unknown_category_rejected() {
        let (service, repo) = service();

        let dto = CreateReportDto {
            category: Some("not-a-category".to_string()),
            ..valid_report_dto()
        };
        let err = service.submit("user-1", dto).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("category")));
        assert_eq!(repo.report_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_too_many_images_rejected() {
        let (service, repo) = service();

        let image = ImagePayloadDto {
            data: Some(png_data_uri(64, 64)),
            content_type: Some("image/png".to_string()),
            filename: Some("photo.png".to_string()),
        };
        let dto = CreateReportDto {
            images: Some(vec![image.clone(), image.clone(), image.clone(), image]),
            ..valid_report_dto()
        };
        let err = service.submit("user-1", dto).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("at most 3")));
        assert_eq!(repo.report_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_image_without_marker_rejected() {
        let (service, _) = service();

        let dto = CreateReportDto {
            images: Some(vec![ImagePayloadDto {
                data: Some("bm90IGEgZGF0YSB1cmk=".to_string()),
                content_type: Some("image/png".to_string()),
                filename: Some("photo.png".to_string()),
            }]),
            ..valid_report_dto()
        };
        let err = service.submit("user-1", dto).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("data URI")));
    }

    #[tokio::test]
    async fn test_submit_disallowed_content_type_rejected() {
        let (service, _) = service();

        let dto = CreateReportDto {
            images: Some(vec![ImagePayloadDto {
                data: Some(png_data_uri(64, 64)),
                content_type: Some("image/gif".to_string()),
                filename: Some("photo.gif".to_string()),
            }]),
            ..valid_report_dto()
        };
        let err = service.submit("user-1", dto).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("not allowed")));
    }

    #[tokio::test]
    async fn test_list_own_is_newest_first_and_owner_scoped() {
        let (service, _) = service();

        let first = service.submit("user-a", valid_report_dto()).await.unwrap();
        let second = service.submit("user-a", valid_report_dto()).await.unwrap();
        service.submit("user-b", valid_report_dto()).await.unwrap();

        let own = service.list_own("user-a").await.unwrap();
        assert_eq!(own.len(), 2);
        assert_eq!(own[0].id, second.id);
        assert_eq!(own[1].id, first.id);
        // payload bytes are excluded from summaries, metadata is present
        assert_eq!(own[0].images.len(), 1);
        assert_eq!(own[0].images[0].content_type, "image/png");
    }

    #[tokio::test]
    async fn test_ownership_isolation_reads_as_not_found() {
        let (service, _) = service();

        let report = service.submit("user-a", valid_report_dto()).await.unwrap();

        let err = service.get_own("user-b", report.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service
            .image_links("user-b", report.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service
            .get_image("user-b", report.id, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_image_round_trip_and_idempotence() {
        let (service, _) = service();

        let report = service.submit("user-1", valid_report_dto()).await.unwrap();

        let (bytes, content_type, filename) =
            service.get_image("user-1", report.id, 0).await.unwrap();
        assert_eq!(content_type, "image/png");
        assert_eq!(filename, "photo.png");
        assert!(image::load_from_memory(&bytes).is_ok());

        let (bytes_again, _, _) = service.get_image("user-1", report.id, 0).await.unwrap();
        assert_eq!(bytes, bytes_again);
    }

    #[tokio::test]
    async fn test_get_image_index_out_of_bounds() {
        let (service, _) = service();

        let report = service.submit("user-1", valid_report_dto()).await.unwrap();

        let err = service
            .get_image("user-1", report.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service
            .get_image("user-1", report.id, -1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_image_links_shape() {
        let (service, _) = service();

        let report = service.submit("user-1", valid_report_dto()).await.unwrap();

        let links = service.image_links("user-1", report.id).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].index, 0);
        assert_eq!(
            links[0].url,
            format!("/api/reports/{}/images/0", report.id)
        );
    }
}
