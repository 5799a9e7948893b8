// =============================================================================
// REPORT SUBMISSION LIMITS
// =============================================================================

/// Minimum description length for a report submission
pub const MIN_DESCRIPTION_LENGTH: usize = 50;

/// Maximum number of images attached to a single report
pub const MAX_IMAGES_PER_REPORT: usize = 3;

/// Maximum decoded image payload size in bytes (5 MiB)
pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for report images and uploads
pub const ALLOWED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/webp"];

// =============================================================================
// IMAGE PIPELINE BOUNDS
// =============================================================================

/// Smallest accepted width/height in pixels
pub const MIN_IMAGE_DIMENSION: u32 = 50;

/// Largest accepted width/height in pixels
pub const MAX_IMAGE_DIMENSION: u32 = 4000;

/// Normalized images are resized to fit within this dimension (never upscaled)
pub const NORMALIZED_MAX_DIMENSION: u32 = 1920;

/// JPEG quality used when re-encoding normalized images
pub const NORMALIZED_JPEG_QUALITY: u8 = 85;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can review all reports and update their status
pub const ROLE_ADMIN: &str = "admin";

/// User role - can submit reports and track their own
pub const ROLE_USER: &str = "user";

/// Cache-Control header value for served image bytes (1 day)
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// Number of recent reports included in the admin dashboard stats
pub const DASHBOARD_RECENT_REPORTS: i64 = 5;
