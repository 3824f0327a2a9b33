//! SpotCrop Core - square crop engine for spot posts
//!
//! This crate turns a user-picked photo into the fixed-size square JPEG a post
//! is published with. It covers decoding the pick, the live zoom/rotate
//! transform, rasterizing that transform onto a square surface, JPEG export,
//! and the select → edit → caption workflow that ties them together.
//!
//! # Modules
//!
//! - [`config`] - Session settings with defaults for every field
//! - [`decode`] - Selected files, decoding, EXIF orientation and resampling
//! - [`transform`] - Zoom/rotation state and the square crop geometry
//! - [`raster`] - The [`Rasterizer`] capability and its CPU implementation
//! - [`encode`] - JPEG export into an [`OutputImage`]
//! - [`workflow`] - The [`CropWorkflow`] stage machine

pub mod config;
pub mod decode;
pub mod encode;
pub mod raster;
pub mod transform;
pub mod workflow;

pub use config::{ConfigError, CropConfig};
pub use decode::{SelectedFile, SourceImage};
pub use encode::OutputImage;
pub use raster::{CpuRasterizer, RasterError, Rasterizer, Surface};
pub use transform::{TransformState, ZoomLimits};
pub use workflow::{
    Command, CompletedPost, CropWorkflow, Outcome, Stage, WorkflowError, WorkflowVariant,
};
