//! Shared fixtures for unit and handler tests.
//!
//! Provides deterministic image fixtures, locally-signed test tokens and an
//! in-memory `ReportRepository` so the full stack can be exercised without a
//! database.

use std::io::Cursor;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::{TimeDelta, Utc};
use image::{ImageOutputFormat, Rgb, RgbImage};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::middleware;
use crate::features::admin::services::AdminService;
use crate::features::auth::JwtValidator;
use crate::features::categories::{default_categories, CategoryRegistry};
use crate::features::reports::dtos::{CoordinatesDto, CreateReportDto, ImagePayloadDto};
use crate::features::reports::models::{
    NewReport, Report, ReportImage, ReportImageMeta, ReportStatus, StatusCounts,
};
use crate::features::reports::repository::ReportRepository;
use crate::features::reports::services::ReportService;
use crate::features::{admin, categories, reports};
use crate::modules::imaging::EncodedImage;

pub const TEST_JWT_SECRET: &str = "test-secret";

// ============================================================================
// Tokens
// ============================================================================

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    email: String,
    role: String,
    exp: i64,
    iat: i64,
}

fn sign_token(sub: &str, role: &str, exp_offset_secs: i64) -> String {
    let now = Utc::now();
    let claims = TestClaims {
        sub: sub.to_string(),
        email: format!("{}@example.com", sub),
        role: role.to_string(),
        exp: (now + TimeDelta::seconds(exp_offset_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn user_token(sub: &str) -> String {
    sign_token(sub, "user", 3600)
}

pub fn admin_token(sub: &str) -> String {
    sign_token(sub, "admin", 3600)
}

pub fn expired_token(sub: &str) -> String {
    sign_token(sub, "user", -3600)
}

// ============================================================================
// Image fixtures
// ============================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    gradient(width, height)
        .write_to(&mut out, ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn jpeg_fixture(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    gradient(width, height)
        .write_to(&mut out, ImageOutputFormat::Jpeg(90))
        .unwrap();
    out.into_inner()
}

pub fn png_data_uri(width: u32, height: u32) -> String {
    EncodedImage {
        content_type: "image/png".to_string(),
        bytes: png_fixture(width, height),
    }
    .to_data_uri()
}

/// A submission that passes every validation check
pub fn valid_report_dto() -> CreateReportDto {
    CreateReportDto {
        description: Some(
            "Jalan berlubang cukup dalam di depan halte, sudah seminggu belum diperbaiki."
                .to_string(),
        ),
        category: Some("jalan".to_string()),
        location: Some("Jl. Sudirman No. 1".to_string()),
        coordinates: Some(CoordinatesDto {
            latitude: Some(-6.2),
            longitude: Some(106.8),
            accuracy: Some(10.0),
        }),
        images: Some(vec![ImagePayloadDto {
            data: Some(png_data_uri(64, 64)),
            content_type: Some("image/png".to_string()),
            filename: Some("photo.png".to_string()),
        }]),
    }
}

// ============================================================================
// In-memory repository
// ============================================================================

struct StoredReport {
    report: Report,
    images: Vec<ReportImage>,
}

/// In-memory `ReportRepository` with the same contracts as the Postgres one.
/// Insertion order stands in for created_at ordering.
pub struct InMemoryReportRepository {
    inner: Mutex<Vec<StoredReport>>,
    clock: AtomicI64,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
            clock: AtomicI64::new(0),
        }
    }

    pub fn report_count(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

impl Default for InMemoryReportRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, new_report: NewReport) -> Result<Report> {
        // Strictly increasing timestamps so newest-first ordering is stable
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now() + TimeDelta::milliseconds(tick);

        let report = Report {
            id: Uuid::new_v4(),
            description: new_report.description,
            category: new_report.category,
            address: new_report.address,
            latitude: new_report.latitude,
            longitude: new_report.longitude,
            accuracy: new_report.accuracy,
            owner_id: new_report.owner_id,
            status: ReportStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let images = new_report
            .images
            .into_iter()
            .enumerate()
            .map(|(position, image)| ReportImage {
                position: position as i32,
                encoded_data: image.encoded_data,
                content_type: image.content_type,
                filename: image.filename,
                size_bytes: image.size_bytes,
            })
            .collect();

        self.inner.lock().unwrap().push(StoredReport {
            report: report.clone(),
            images,
        });

        Ok(report)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Report>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|s| s.report.owner_id == owner_id)
            .map(|s| s.report.clone())
            .collect())
    }

    async fn find_owned(&self, id: Uuid, owner_id: &str) -> Result<Option<Report>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.report.id == id && s.report.owner_id == owner_id)
            .map(|s| s.report.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.report.id == id)
            .map(|s| s.report.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Report>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .rev()
            .map(|s| s.report.clone())
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: ReportStatus) -> Result<Option<Report>> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.iter_mut().find(|s| s.report.id == id).map(|s| {
            s.report.status = status;
            s.report.updated_at = Utc::now();
            s.report.clone()
        }))
    }

    async fn images_meta(&self, report_id: Uuid) -> Result<Vec<ReportImageMeta>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.report.id == report_id)
            .flat_map(|s| s.images.iter())
            .map(|i| ReportImageMeta {
                position: i.position,
                content_type: i.content_type.clone(),
                filename: i.filename.clone(),
                size_bytes: i.size_bytes,
            })
            .collect())
    }

    async fn images(&self, report_id: Uuid) -> Result<Vec<ReportImage>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.report.id == report_id)
            .flat_map(|s| s.images.iter().cloned())
            .collect())
    }

    async fn image_at(&self, report_id: Uuid, index: i32) -> Result<Option<ReportImage>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.report.id == report_id)
            .flat_map(|s| s.images.iter())
            .find(|i| i.position == index)
            .cloned())
    }

    async fn status_counts(&self) -> Result<StatusCounts> {
        let inner = self.inner.lock().unwrap();
        Ok(StatusCounts {
            total: inner.len() as i64,
            pending: inner
                .iter()
                .filter(|s| s.report.status == ReportStatus::Pending)
                .count() as i64,
            resolved: inner
                .iter()
                .filter(|s| s.report.status == ReportStatus::Resolved)
                .count() as i64,
        })
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Report>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit as usize)
            .map(|s| s.report.clone())
            .collect())
    }
}

// ============================================================================
// Test application
// ============================================================================

/// Build the application router against an in-memory repository, wired the
/// same way as `main.rs` (auth middleware included).
pub fn test_app(repo: Arc<InMemoryReportRepository>) -> Router {
    let validator = Arc::new(JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0)));
    let registry = Arc::new(CategoryRegistry::new(default_categories()));

    let repo = repo as Arc<dyn ReportRepository>;
    let report_service = Arc::new(ReportService::new(Arc::clone(&repo), Arc::clone(&registry)));
    let admin_service = Arc::new(AdminService::new(repo));

    let protected_routes = Router::new()
        .merge(reports::routes::routes(report_service))
        .nest("/api/admin", admin::routes::routes(admin_service))
        .route_layer(axum::middleware::from_fn_with_state(
            validator,
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(protected_routes)
        .merge(categories::routes::routes(registry))
}
