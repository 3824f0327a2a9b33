//! Workflow stages, variants and user commands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which steps follow image selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowVariant {
    /// Select, edit, then complete on confirm.
    TwoStep,
    /// Select, edit, then write a caption before submitting.
    #[default]
    ThreeStep,
}

/// Where the crop workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// Waiting for the user to pick an image.
    Select,
    /// Zooming and rotating the selected image.
    Edit,
    /// Writing the caption for the cropped image (three-step only).
    Caption,
    /// The output has been handed over. Terminal.
    Completed,
    /// Dismissed before completion. Terminal.
    Closed,
}

impl Stage {
    /// Stable lowercase name, as exposed to the web client.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Select => "select",
            Stage::Edit => "edit",
            Stage::Caption => "caption",
            Stage::Completed => "completed",
            Stage::Closed => "closed",
        }
    }

    /// True for stages no command can leave.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Completed | Stage::Closed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user action on the crop dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Zoom in by one step.
    ZoomIn,
    /// Zoom out by one step.
    ZoomOut,
    /// Rotate a quarter turn clockwise.
    Rotate,
    /// Commit the current transform and move on.
    Confirm,
    /// Return to the previous stage.
    Back,
    /// Dismiss the workflow.
    Cancel,
}

impl Command {
    /// Stable lowercase name, used in errors and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Command::ZoomIn => "zoomIn",
            Command::ZoomOut => "zoomOut",
            Command::Rotate => "rotate",
            Command::Confirm => "confirm",
            Command::Back => "back",
            Command::Cancel => "cancel",
        }
    }

    /// Parse the name produced by [`Command::as_str`].
    pub fn parse(name: &str) -> Option<Self> {
        let command = match name {
            "zoomIn" => Command::ZoomIn,
            "zoomOut" => Command::ZoomOut,
            "rotate" => Command::Rotate,
            "confirm" => Command::Confirm,
            "back" => Command::Back,
            "cancel" => Command::Cancel,
            _ => return None,
        };
        Some(command)
    }

    /// Commands that change the transform state.
    pub fn is_transform(self) -> bool {
        matches!(self, Command::ZoomIn | Command::ZoomOut | Command::Rotate)
    }
}
