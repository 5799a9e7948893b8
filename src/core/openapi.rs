use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::categories::handlers as categories_handlers;
use crate::features::reports::{
    dtos as reports_dtos, handlers::report_handler, models as reports_models,
};
use crate::features::uploads::{dtos as uploads_dtos, handlers::upload_handler};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (public)
        categories_handlers::list_categories,
        // Reports
        report_handler::create_report,
        report_handler::list_my_reports,
        report_handler::get_report,
        report_handler::list_report_images,
        report_handler::get_report_image,
        // Uploads
        upload_handler::upload_images,
        // Admin
        admin_handlers::list_reports,
        admin_handlers::get_report,
        admin_handlers::list_report_images,
        admin_handlers::get_report_image,
        admin_handlers::update_report_status,
        admin_handlers::dashboard_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_models::ReportStatus,
            reports_dtos::CreateReportDto,
            reports_dtos::CoordinatesDto,
            reports_dtos::ImagePayloadDto,
            reports_dtos::CreatedReportDto,
            reports_dtos::LocationDto,
            reports_dtos::CoordinatesResponseDto,
            reports_dtos::ImageMetaDto,
            reports_dtos::ImageDto,
            reports_dtos::ImageLinkDto,
            reports_dtos::ReportSummaryDto,
            reports_dtos::ReportDetailDto,
            ApiResponse<reports_dtos::CreatedReportDto>,
            ApiResponse<Vec<reports_dtos::ReportSummaryDto>>,
            ApiResponse<reports_dtos::ReportDetailDto>,
            ApiResponse<Vec<reports_dtos::ImageLinkDto>>,
            // Uploads
            uploads_dtos::UploadImagesDto,
            uploads_dtos::ProcessedImageDto,
            ApiResponse<Vec<uploads_dtos::ProcessedImageDto>>,
            // Admin
            admin_dtos::ImagePreviewDto,
            admin_dtos::AdminReportSummaryDto,
            admin_dtos::AdminReportDetailDto,
            admin_dtos::UpdateReportStatusDto,
            admin_dtos::DashboardCountsDto,
            admin_dtos::DashboardStatsDto,
            ApiResponse<Vec<admin_dtos::AdminReportSummaryDto>>,
            ApiResponse<admin_dtos::AdminReportDetailDto>,
            ApiResponse<admin_dtos::DashboardStatsDto>,
        )
    ),
    tags(
        (name = "categories", description = "Report categories (public)"),
        (name = "reports", description = "Citizen report submission and tracking"),
        (name = "uploads", description = "Standalone image upload pipeline"),
        (name = "admin", description = "Admin review and triage endpoints"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Lapor-in API",
        version = "0.1.0",
        description = "API documentation for the Lapor-in backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
