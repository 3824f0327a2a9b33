//! WASM-compatible wrapper types for crop results.
//!
//! These wrap the core SpotCrop types and handle the conversion between Rust
//! and JavaScript data representations.

use spotcrop_core::decode::DecodedImage;
use spotcrop_core::{CompletedPost, OutputImage};
use wasm_bindgen::prelude::*;

/// Rendered RGB pixels for JavaScript (used for previews).
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`, ready to be expanded to
/// RGBA for an `ImageData`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }
}

/// The exported square JPEG.
///
/// `bytes()` is what the upload step turns into a `File`:
///
/// ```typescript
/// const file = new File([output.bytes()], output.file_name, { type: output.mime_type });
/// ```
#[wasm_bindgen]
#[derive(Clone)]
pub struct JsOutputImage {
    bytes: Vec<u8>,
    mime_type: String,
    file_name: String,
    side: u32,
}

#[wasm_bindgen]
impl JsOutputImage {
    /// Encoded JPEG bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// Width and height in pixels.
    #[wasm_bindgen(getter)]
    pub fn side(&self) -> u32 {
        self.side
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl From<OutputImage> for JsOutputImage {
    fn from(output: OutputImage) -> Self {
        Self {
            bytes: output.bytes,
            mime_type: output.mime_type,
            file_name: output.file_name,
            side: output.side,
        }
    }
}

/// A finished post: the exported image plus the caption, if any.
#[wasm_bindgen]
pub struct JsCompletedPost {
    image: JsOutputImage,
    caption: Option<String>,
}

#[wasm_bindgen]
impl JsCompletedPost {
    #[wasm_bindgen(getter)]
    pub fn image(&self) -> JsOutputImage {
        self.image.clone()
    }

    /// Submitted caption; undefined for the two-step workflow.
    #[wasm_bindgen(getter)]
    pub fn caption(&self) -> Option<String> {
        self.caption.clone()
    }
}

impl From<CompletedPost> for JsCompletedPost {
    fn from(post: CompletedPost) -> Self {
        Self {
            image: post.image.into(),
            caption: post.caption,
        }
    }
}
