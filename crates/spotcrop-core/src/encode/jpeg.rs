//! JPEG encoding of rasterized surfaces.
//!
//! Uses the `image` crate's JPEG encoder. Posts default to quality 90
//! (`CropConfig::jpeg_quality`).

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::raster::Surface;

use super::OutputImage;

/// MIME type of every exported image.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a rasterized surface into the final [`OutputImage`].
///
/// Consumes the surface: once exported, the pixels only live on as JPEG.
pub fn export_jpeg(
    surface: Surface,
    quality: u8,
    file_name: &str,
) -> Result<OutputImage, EncodeError> {
    let side = surface.side();
    let image = surface.into_image();
    let bytes = encode_jpeg(&image.pixels, image.width, image.height, quality)?;

    tracing::debug!(side, quality, bytes = bytes.len(), "exported surface as JPEG");

    Ok(OutputImage {
        bytes,
        mime_type: JPEG_MIME_TYPE.to_string(),
        file_name: file_name.to_string(),
        side,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
