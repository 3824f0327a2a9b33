//! Viewport transforms: interactive state, square cropping, rotation/zoom.
//!
//! This module holds the pure pieces the rasterizer composes:
//!
//! 1. Crop the source to its centered square
//! 2. Fit that square to the output side
//! 3. Rotate (quarter turns, clockwise) and zoom about the center
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Zoom is a uniform scale about the viewport center

mod crop;
mod rotation;
mod state;

pub use crop::{crop_to_square, square_crop_region};
pub use rotation::{apply_view_transform, sample_bilinear, InverseMapping};
pub use state::{TransformState, ZoomLimits, ZOOM_GRID};
