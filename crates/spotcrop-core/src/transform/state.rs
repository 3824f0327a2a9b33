//! Interactive zoom/rotation state for the crop viewport.
//!
//! The state only changes through the explicit operations below; every
//! operation is total and keeps the value inside its domain.

use serde::{Deserialize, Serialize};

/// Zoom values are snapped to multiples of `1 / ZOOM_GRID` after every step.
pub const ZOOM_GRID: f64 = 1000.0;

/// Zoom step and bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    /// Amount added or removed by a single zoom action.
    pub step: f64,
    /// Smallest allowed zoom factor.
    pub min: f64,
    /// Largest allowed zoom factor.
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            step: 0.1,
            min: 0.5,
            max: 3.0,
        }
    }
}

impl ZoomLimits {
    /// Check the limits describe a usable, non-empty range containing 1.0.
    ///
    /// The step must be a whole multiple of `1 / ZOOM_GRID`, otherwise
    /// snapping would swallow or distort it.
    pub fn is_valid(&self) -> bool {
        let grid_steps = self.step * ZOOM_GRID;
        grid_steps.round() >= 1.0
            && (grid_steps - grid_steps.round()).abs() < 1e-6
            && self.min > 0.0
            && self.min <= 1.0
            && self.max >= 1.0
            && self.step.is_finite()
            && self.max.is_finite()
    }
}

/// Current zoom and rotation applied to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    zoom: f64,
    rotation_degrees: u16,
    #[serde(skip)]
    limits: ZoomLimits,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl TransformState {
    /// Identity transform using the given zoom limits.
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            zoom: 1.0,
            rotation_degrees: 0,
            limits,
        }
    }

    /// Current zoom factor, always within the configured bounds.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current rotation, one of 0, 90, 180 or 270.
    pub fn rotation_degrees(&self) -> u16 {
        self.rotation_degrees
    }

    /// Number of clockwise quarter turns (0..=3).
    pub fn quarter_turns(&self) -> u8 {
        (self.rotation_degrees / 90) as u8
    }

    /// Rotation in radians, as used by the rasterizer.
    pub fn rotation_radians(&self) -> f64 {
        f64::from(self.rotation_degrees).to_radians()
    }

    /// Zoom limits this state clamps against.
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Increase zoom by one step, clamped at the maximum.
    pub fn zoom_in(&mut self) {
        self.zoom = self.stepped(self.limits.step);
    }

    /// Decrease zoom by one step, clamped at the minimum.
    pub fn zoom_out(&mut self) {
        self.zoom = self.stepped(-self.limits.step);
    }

    /// Advance rotation by 90 degrees clockwise, wrapping at 360.
    pub fn rotate(&mut self) {
        self.rotation_degrees = (self.rotation_degrees + 90) % 360;
    }

    /// Restore the identity transform.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.rotation_degrees = 0;
    }

    /// True when no zoom or rotation is applied.
    pub fn is_identity(&self) -> bool {
        self.zoom == 1.0 && self.rotation_degrees == 0
    }

    /// CSS transform for the live preview `<img>` inside the viewport.
    pub fn css_transform(&self) -> String {
        format!("scale({}) rotate({}deg)", self.zoom, self.rotation_degrees)
    }

    fn stepped(&self, delta: f64) -> f64 {
        // Snap to the resolution grid so repeated steps of 0.1 land on the decimal values.
        let next = ((self.zoom + delta) * ZOOM_GRID).round() / ZOOM_GRID;
        next.clamp(self.limits.min, self.limits.max)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
