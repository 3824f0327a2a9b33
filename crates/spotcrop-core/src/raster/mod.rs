//! Baking a transform onto a source image.
//!
//! A [`Rasterizer`] is the drawing-surface capability of a target platform:
//! given a loaded [`SourceImage`] and the [`TransformState`] at commit time it
//! produces a square [`Surface`]. The crate ships a CPU implementation that
//! works natively and under WASM.
//!
//! # Drawing order
//!
//! 1. Fill a `side x side` surface with the background colour
//! 2. Crop the source to its centered square and fit it to the surface
//! 3. Rotate about the center, then scale by the zoom factor
//!
//! Zoom therefore scales the already-cropped square: zoom 1.0 fills the
//! surface exactly and anything below it leaves background margins.

mod cpu;

pub use cpu::{CpuRasterizer, MAX_SURFACE_SIDE};

use thiserror::Error;

use crate::decode::{DecodeError, DecodedImage, SourceImage};
use crate::transform::TransformState;

/// Errors that prevent a surface from being produced.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The source has not finished loading, so its dimensions are unknown.
    #[error("Image not ready: source pixels are not loaded")]
    ImageNotReady,

    /// A drawing surface of the requested side cannot be created.
    #[error("Drawing surface unavailable for side {side}")]
    SurfaceUnavailable { side: u32 },

    /// Fitting the cropped square to the surface failed.
    #[error("Resampling failed: {0}")]
    Resample(#[from] DecodeError),
}

/// A rasterized square image together with the transform it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: DecodedImage,
    state: TransformState,
}

impl Surface {
    /// Side length in pixels.
    pub fn side(&self) -> u32 {
        self.image.width
    }

    /// The rendered pixels.
    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    /// Consume the surface, keeping only its pixels.
    pub fn into_image(self) -> DecodedImage {
        self.image
    }

    /// Transform captured when this surface was drawn.
    pub fn state(&self) -> TransformState {
        self.state
    }
}

/// Drawing-surface capability: bakes a transform onto a source image.
pub trait Rasterizer {
    /// Render `source` through `state` onto a new `side x side` surface.
    ///
    /// # Errors
    ///
    /// `RasterError::ImageNotReady` when the source is not loaded, and
    /// `RasterError::SurfaceUnavailable` when no surface of that side can be
    /// created. No partial surface is ever returned.
    fn rasterize(
        &self,
        source: &SourceImage,
        state: &TransformState,
        side: u32,
    ) -> Result<Surface, RasterError>;
}
