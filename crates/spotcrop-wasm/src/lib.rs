//! SpotCrop WASM - WebAssembly bindings for the SpotCrop crop engine
//!
//! This crate exposes spotcrop-core to the spot submission page.
//!
//! # Module Structure
//!
//! - `session` - The crop dialog session (`JsCropSession`)
//! - `types` - WASM-compatible wrapper types for previews and exported images
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@spotcrop/wasm';
//!
//! await init();
//!
//! const session = new JsCropSession(undefined, undefined);
//! session.select_image(new Uint8Array(await file.arrayBuffer()), file.type, file.name);
//! session.apply('rotate');
//! session.apply('confirm');
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;

pub use session::JsCropSession;
pub use types::{JsCompletedPost, JsDecodedImage, JsOutputImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
