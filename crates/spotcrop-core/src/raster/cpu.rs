//! CPU rasterizer operating on RGB buffers.

use crate::decode::{resize, FilterType, SourceImage};
use crate::transform::{apply_view_transform, crop_to_square, TransformState};

use super::{RasterError, Rasterizer, Surface};

/// Largest surface side we will allocate. Matches the common browser canvas
/// limit, so CPU and canvas-backed rasterizers agree on what is drawable.
pub const MAX_SURFACE_SIDE: u32 = 16_384;

/// Rasterizer that renders into an in-memory RGB buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuRasterizer {
    background: [u8; 3],
    filter: FilterType,
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new([0, 0, 0], FilterType::Lanczos3)
    }
}

impl CpuRasterizer {
    /// Rasterizer painting uncovered areas with `background` and fitting the
    /// cropped square with `filter`.
    pub fn new(background: [u8; 3], filter: FilterType) -> Self {
        Self { background, filter }
    }

    /// Same background, different fitting filter (e.g. bilinear previews).
    pub fn with_filter(self, filter: FilterType) -> Self {
        Self { filter, ..self }
    }

    fn check_surface(side: u32) -> Result<(), RasterError> {
        let fits = (side as usize)
            .checked_mul(side as usize)
            .and_then(|n| n.checked_mul(3))
            .is_some();
        if side == 0 || side > MAX_SURFACE_SIDE || !fits {
            return Err(RasterError::SurfaceUnavailable { side });
        }
        Ok(())
    }
}

impl Rasterizer for CpuRasterizer {
    fn rasterize(
        &self,
        source: &SourceImage,
        state: &TransformState,
        side: u32,
    ) -> Result<Surface, RasterError> {
        let decoded = match source.decoded() {
            Some(img) if !img.is_empty() => img,
            _ => return Err(RasterError::ImageNotReady),
        };
        Self::check_surface(side)?;

        let square = crop_to_square(decoded);
        let fitted = resize(&square, side, side, self.filter)?;
        let image = apply_view_transform(&fitted, state, self.background);

        tracing::debug!(
            source_width = decoded.width,
            source_height = decoded.height,
            side,
            zoom = state.zoom(),
            rotation = state.rotation_degrees(),
            "rasterized surface"
        );

        Ok(Surface {
            image,
            state: *state,
        })
    }
}
