//! Image codec and validator.
//!
//! Decodes incoming image buffers, checks format and dimension bounds, and
//! normalizes accepted images (fit within 1920px, JPEG re-encode). The
//! transform is deterministic: the same input bytes always produce the same
//! output bytes.

use std::io::Cursor;

use base64::prelude::*;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::io::Reader as ImageReader;

use crate::core::error::AppError;
use crate::shared::constants::{
    MAX_IMAGE_DIMENSION, MIN_IMAGE_DIMENSION, NORMALIZED_JPEG_QUALITY, NORMALIZED_MAX_DIMENSION,
};
use crate::shared::validation::DATA_URI_REGEX;

/// Smallest buffer worth handing to the decoder (a minimal valid header).
const MIN_IMAGE_BYTES: usize = 12;

/// Check whether a buffer holds a decodable image within dimension bounds.
///
/// Only reads format metadata - no full decode, no content inspection.
/// Returns false for unrecognized formats and for width/height outside
/// [MIN_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION].
pub fn validate(buffer: &[u8]) -> bool {
    if buffer.len() < MIN_IMAGE_BYTES {
        return false;
    }

    let reader = match ImageReader::new(Cursor::new(buffer)).with_guessed_format() {
        Ok(reader) => reader,
        Err(_) => return false,
    };

    if reader.format().is_none() {
        return false;
    }

    let (width, height) = match reader.into_dimensions() {
        Ok(dims) => dims,
        Err(_) => return false,
    };

    (MIN_IMAGE_DIMENSION..=MAX_IMAGE_DIMENSION).contains(&width)
        && (MIN_IMAGE_DIMENSION..=MAX_IMAGE_DIMENSION).contains(&height)
}

/// Normalize an image buffer for storage.
///
/// Resizes so neither dimension exceeds NORMALIZED_MAX_DIMENSION (aspect
/// ratio preserved, never upscaled), then re-encodes as RGB JPEG at the
/// fixed quality setting. Fails without partial output - callers must not
/// persist anything on error.
pub fn normalize(buffer: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(buffer)
        .map_err(|e| AppError::Validation(format!("Invalid image data: {}", e)))?;

    let img = if img.width() > NORMALIZED_MAX_DIMENSION || img.height() > NORMALIZED_MAX_DIMENSION
    {
        img.resize(
            NORMALIZED_MAX_DIMENSION,
            NORMALIZED_MAX_DIMENSION,
            FilterType::Lanczos3,
        )
    } else {
        img
    };

    let rgb = img.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut out, NORMALIZED_JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| AppError::Internal(format!("Failed to encode image: {}", e)))?;

    Ok(out.into_inner())
}

/// An image payload in its self-describing encoded-at-rest form:
/// `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// Parse a data-URI string into content type and decoded bytes.
    ///
    /// Fails with a Validation error when the marker is missing, names a
    /// non-image MIME type, or the payload is not valid base64.
    pub fn parse(data: &str) -> Result<Self, AppError> {
        let caps = DATA_URI_REGEX.captures(data).ok_or_else(|| {
            AppError::Validation("Image data must be a base64 data URI".to_string())
        })?;

        let content_type = caps[1].to_string();
        let payload = &data[caps[0].len()..];

        let bytes = BASE64_STANDARD
            .decode(payload)
            .map_err(|e| AppError::Validation(format!("Invalid base64 image payload: {}", e)))?;

        Ok(Self {
            content_type,
            bytes,
        })
    }

    /// Encode back into the storable data-URI form.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64_STANDARD.encode(&self.bytes)
        )
    }

    /// Decoded payload size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
