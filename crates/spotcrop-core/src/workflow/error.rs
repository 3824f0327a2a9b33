//! Errors that block a workflow transition.
//!
//! None of these are fatal: the offending transition is refused, the workflow
//! keeps its previous state and the user can retry.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::raster::RasterError;

use super::Stage;

/// Reasons a workflow transition was refused.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The source has not finished loading.
    #[error("Image not ready: source pixels are not loaded")]
    ImageNotReady,

    /// No drawing surface of the configured side could be created.
    #[error("Drawing surface unavailable for side {side}")]
    SurfaceUnavailable { side: u32 },

    /// Producing the output image failed while resampling or encoding.
    #[error("Encoding the cropped image failed: {0}")]
    EncodeFailure(String),

    /// A caption is required before submitting.
    #[error("Caption must not be empty")]
    EmptyCaption,

    /// Submitting an edit that changes nothing.
    #[error("Nothing changed since the last submission")]
    NoChanges,

    /// An export is still outstanding.
    #[error("Still processing the previous confirm")]
    Busy,

    /// The stage needs a selected image and there is none.
    #[error("No image has been selected")]
    NoSourceImage,

    /// The action does not apply to the current stage.
    #[error("Cannot {action} while in the {stage} stage")]
    InvalidTransition { stage: Stage, action: &'static str },

    /// The selected file could not be decoded.
    #[error("Could not load the selected image: {0}")]
    Decode(#[from] DecodeError),
}

impl From<RasterError> for WorkflowError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::ImageNotReady => WorkflowError::ImageNotReady,
            RasterError::SurfaceUnavailable { side } => WorkflowError::SurfaceUnavailable { side },
            RasterError::Resample(e) => WorkflowError::EncodeFailure(e.to_string()),
        }
    }
}
