//! Export of rasterized surfaces.
//!
//! This module provides functionality for:
//! - Encoding RGB buffers to JPEG with configurable quality
//! - Packaging a finished surface as the [`OutputImage`] handed to the
//!   post-completion flow
//!
//! # Examples
//!
//! ```ignore
//! use spotcrop_core::encode::export_jpeg;
//!
//! let output = export_jpeg(surface, 90, "cropped.jpg")?;
//! assert_eq!(output.mime_type, "image/jpeg");
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, export_jpeg, EncodeError, JPEG_MIME_TYPE};

/// Final square image produced at commit time.
///
/// Created once per commit and never modified; ownership passes to whoever
/// completes the post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Always `image/jpeg`.
    pub mime_type: String,
    /// Synthetic file name for the upload.
    pub file_name: String,
    /// Width and height in pixels.
    pub side: u32,
}

impl OutputImage {
    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
