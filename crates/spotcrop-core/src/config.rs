//! Crop session configuration.
//!
//! The web client passes this as a plain object; every field has a default so
//! partial objects (or none at all) are accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::raster::MAX_SURFACE_SIDE;
use crate::transform::ZoomLimits;
use crate::workflow::WorkflowVariant;

/// Side length of the posted square image, in pixels.
pub const DEFAULT_OUTPUT_SIDE: u32 = 1080;

/// JPEG quality for the posted image.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// File name given to the exported image.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "cropped.jpg";

/// Side of the on-screen crop viewport used for pixel previews.
pub const DEFAULT_PREVIEW_SIDE: u32 = 320;

/// Longest edge kept when loading a source; larger captures are downscaled.
pub const DEFAULT_MAX_SOURCE_EDGE: u32 = 4096;

/// Errors raised by [`CropConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A side length was zero.
    #[error("{field} must be greater than zero")]
    ZeroSide { field: &'static str },

    /// A side length exceeds the largest drawable surface.
    #[error("{field} must be at most {max}, got {side}")]
    SideTooLarge {
        field: &'static str,
        side: u32,
        max: u32,
    },

    /// JPEG quality outside 1-100.
    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    /// Zoom limits that cannot contain the identity zoom.
    #[error("Invalid zoom limits: step {step}, range {min}..={max}")]
    InvalidZoom { step: f64, min: f64, max: f64 },

    /// Empty output file name.
    #[error("Output file name must not be empty")]
    EmptyFileName,
}

/// Settings for one crop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Side of the exported square.
    pub output_side: u32,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Synthetic file name of the exported image.
    pub output_file_name: String,
    /// Zoom step and bounds.
    pub zoom: ZoomLimits,
    /// Side of pixel previews.
    pub preview_side: u32,
    /// Sources larger than this on their longest edge are downscaled on load.
    /// Zero disables the bound.
    pub max_source_edge: u32,
    /// Colour of surface areas the zoomed-out image does not cover.
    pub background: [u8; 3],
    /// Filter used to fit the cropped square to the output side.
    pub filter: FilterType,
    /// Whether a caption step follows the edit step.
    pub variant: WorkflowVariant,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            output_side: DEFAULT_OUTPUT_SIDE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            zoom: ZoomLimits::default(),
            preview_side: DEFAULT_PREVIEW_SIDE,
            max_source_edge: DEFAULT_MAX_SOURCE_EDGE,
            background: [0, 0, 0],
            filter: FilterType::Lanczos3,
            variant: WorkflowVariant::ThreeStep,
        }
    }
}

impl CropConfig {
    /// Default configuration with the given workflow variant.
    pub fn with_variant(variant: WorkflowVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Check every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_side("outputSide", self.output_side)?;
        check_side("previewSide", self.preview_side)?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidQuality(self.jpeg_quality));
        }
        if !self.zoom.is_valid() {
            return Err(ConfigError::InvalidZoom {
                step: self.zoom.step,
                min: self.zoom.min,
                max: self.zoom.max,
            });
        }
        if self.output_file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        Ok(())
    }
}

fn check_side(field: &'static str, side: u32) -> Result<(), ConfigError> {
    if side == 0 {
        return Err(ConfigError::ZeroSide { field });
    }
    if side > MAX_SURFACE_SIDE {
        return Err(ConfigError::SideTooLarge {
            field,
            side,
            max: MAX_SURFACE_SIDE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::value::{Error as ValueError, MapDeserializer};

    #[test]
    fn test_default_is_valid() {
        let config = CropConfig::default();
        assert_eq!(config.output_side, 1080);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.output_file_name, "cropped.jpg");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_variant() {
        let config = CropConfig::with_variant(WorkflowVariant::TwoStep);
        assert_eq!(config.variant, WorkflowVariant::TwoStep);
        assert_eq!(config.output_side, DEFAULT_OUTPUT_SIDE);
    }

    #[test]
    fn test_zero_output_side_rejected() {
        let mut config = CropConfig::default();
        config.output_side = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroSide {
                field: "outputSide"
            })
        );
    }

    #[test]
    fn test_undrawable_sides_rejected() {
        let mut config = CropConfig::default();
        config.output_side = 20_000;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SideTooLarge {
                field: "outputSide",
                side: 20_000,
                max: MAX_SURFACE_SIDE,
            })
        );

        config.output_side = MAX_SURFACE_SIDE;
        assert!(config.validate().is_ok());

        config.preview_side = MAX_SURFACE_SIDE + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SideTooLarge {
                field: "previewSide",
                ..
            })
        ));
    }

    #[test]
    fn test_quality_bounds() {
        let mut config = CropConfig::default();
        config.jpeg_quality = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidQuality(0)));

        config.jpeg_quality = 101;
        assert_eq!(config.validate(), Err(ConfigError::InvalidQuality(101)));

        config.jpeg_quality = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_zoom_rejected() {
        let mut config = CropConfig::default();
        config.zoom.step = 0.0004;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidZoom { .. })
        ));

        let mut config = CropConfig::default();
        config.zoom.max = 0.8;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidZoom { .. })
        ));
    }

    #[test]
    fn test_blank_file_name_rejected() {
        let mut config = CropConfig::default();
        config.output_file_name = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyFileName));
    }

    #[test]
    fn test_partial_object_uses_defaults() {
        let entries = vec![("outputSide", 512u32), ("previewSide", 200u32)];
        let de: MapDeserializer<'_, _, ValueError> = MapDeserializer::new(entries.into_iter());
        let config = CropConfig::deserialize(de).unwrap();

        assert_eq!(config.output_side, 512);
        assert_eq!(config.preview_side, 200);
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
        assert_eq!(config.variant, WorkflowVariant::ThreeStep);
    }
}
