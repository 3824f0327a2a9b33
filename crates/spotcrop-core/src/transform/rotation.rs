//! Rotation and zoom about the viewport center, by inverse mapping.
//!
//! The viewport draws the source the way a 2D canvas does: translate to the
//! center, rotate (clockwise on screen for positive angles, since y points
//! down), then scale. To fill an output pixel we run that chain backwards:
//!
//! ```text
//! dx, dy = dst - center
//! src_x  = ( dx * cos(θ) + dy * sin(θ)) / zoom + center
//! src_y  = (-dx * sin(θ) + dy * cos(θ)) / zoom + center
//! ```
//!
//! Source and destination share the same square side here: the source has
//! already been cropped and fitted to the output surface.

use crate::decode::DecodedImage;

use super::TransformState;

/// Exact `(cos, sin)` for clockwise quarter turns, avoiding the tiny
/// residues `f64::sin` leaves at multiples of π/2.
const QUARTER_TURNS: [(f64, f64); 4] = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];

/// Maps destination pixel centers back into source coordinates.
#[derive(Debug, Clone, Copy)]
pub struct InverseMapping {
    cos: f64,
    sin: f64,
    inv_zoom: f64,
    center: f64,
}

impl InverseMapping {
    /// Inverse of `state` applied about the center of a `side x side` square.
    pub fn new(state: &TransformState, side: u32) -> Self {
        let (cos, sin) = QUARTER_TURNS[usize::from(state.quarter_turns() % 4)];
        Self {
            cos,
            sin,
            inv_zoom: 1.0 / state.zoom(),
            center: f64::from(side) / 2.0,
        }
    }

    /// Source position (continuous coordinates) for the center of
    /// destination pixel `(x, y)`.
    #[inline]
    pub fn source_position(&self, x: u32, y: u32) -> (f64, f64) {
        let dx = f64::from(x) + 0.5 - self.center;
        let dy = f64::from(y) + 0.5 - self.center;
        let sx = (dx * self.cos + dy * self.sin) * self.inv_zoom + self.center;
        let sy = (-dx * self.sin + dy * self.cos) * self.inv_zoom + self.center;
        (sx, sy)
    }
}

/// Sample `image` at continuous position `(x, y)` with bilinear interpolation.
///
/// Positions outside the image return `None`, leaving the caller to paint
/// background. Inside the image, neighbours past the last row/column are
/// clamped to the edge so the border keeps its colour.
pub fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 3]> {
    let (w, h) = (f64::from(image.width), f64::from(image.height));
    if !(0.0..w).contains(&x) || !(0.0..h).contains(&y) {
        return None;
    }

    // Shift from continuous coordinates to pixel-center indices.
    let fx = (x - 0.5).clamp(0.0, w - 1.0);
    let fy = (y - 0.5).clamp(0.0, h - 1.0);

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);
    let tx = fx - f64::from(x0);
    let ty = fy - f64::from(y0);

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = f64::from(p00[i]) * (1.0 - tx) * (1.0 - ty)
            + f64::from(p10[i]) * tx * (1.0 - ty)
            + f64::from(p01[i]) * (1.0 - tx) * ty
            + f64::from(p11[i]) * tx * ty;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(result)
}

/// Render `fitted` (a `side x side` square) through `state` onto a fresh
/// square of the same side, painting uncovered pixels with `background`.
pub fn apply_view_transform(
    fitted: &DecodedImage,
    state: &TransformState,
    background: [u8; 3],
) -> DecodedImage {
    let side = fitted.width;
    if state.is_identity() {
        return fitted.clone();
    }

    let mapping = InverseMapping::new(state, side);
    let mut output = Vec::with_capacity(side as usize * side as usize * 3);

    for y in 0..side {
        for x in 0..side {
            let (sx, sy) = mapping.source_position(x, y);
            let pixel = sample_bilinear(fitted, sx, sy).unwrap_or(background);
            output.extend_from_slice(&pixel);
        }
    }

    DecodedImage::new(side, side, output)
}
