//! Source image loading for the crop engine.
//!
//! This module provides functionality for:
//! - Decoding the picked file (JPEG or PNG) with EXIF orientation applied
//! - Tracking whether a selected source has finished loading
//! - Resizing, used to bound oversized camera captures
//!
//! # Examples
//!
//! ```ignore
//! use spotcrop_core::decode::{SelectedFile, SourceImage};
//!
//! let file = SelectedFile::new(bytes, "image/jpeg", "IMG_0042.jpg");
//! let mut source = SourceImage::pending(file);
//! source.load(4096)?;
//! assert!(source.is_ready());
//! ```

mod loader;
mod resize;
mod source;
mod types;

pub use loader::{decode_image, get_orientation};
pub use resize::{resize, resize_to_fit};
pub use source::{SelectedFile, SourceImage};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
