//! Centered square cropping.
//!
//! The crop viewport is square, so the source is first cut down to the
//! largest centered square it contains: the shorter side is kept whole and
//! the longer side loses equal margins on both ends (odd remainders go to the
//! far edge).

use crate::decode::DecodedImage;

/// Pixel region of the centered square inside a `width x height` image.
///
/// Returns `(left, top, side)`.
pub fn square_crop_region(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;
    (left, top, side)
}

/// Cut the centered square out of `image`.
///
/// Already-square images are returned as a copy. A zero-sized image yields a
/// zero-sized result.
pub fn crop_to_square(image: &DecodedImage) -> DecodedImage {
    if image.width == image.height {
        return image.clone();
    }

    let (left, top, side) = square_crop_region(image.width, image.height);
    let src_stride = image.width as usize * 3;
    let row_len = side as usize * 3;

    let mut output = Vec::with_capacity(row_len * side as usize);
    for y in 0..side as usize {
        let start = (top as usize + y) * src_stride + left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage::new(side, side, output)
}
