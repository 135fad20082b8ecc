//! Per-axis configuration from TOML.

use serde::Deserialize;

use super::limits::SoftLimits;
use super::units::{Degrees, Steps};

/// Geometry of one axis: how degrees map to steps and how far it may travel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AxisConfig {
    /// Motor steps per degree of output rotation (after microstepping and gearing).
    pub steps_per_degree: f32,

    /// Travel range; commands are clamped onto it.
    #[serde(default)]
    pub limits: SoftLimits,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,
}

impl AxisConfig {
    /// Create an axis with the default ±90° travel.
    pub fn new(steps_per_degree: f32) -> Self {
        Self {
            steps_per_degree,
            limits: SoftLimits::default(),
            invert_direction: false,
        }
    }

    /// Replace the travel range.
    pub fn with_limits(mut self, limits: SoftLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Clamp a commanded angle and convert it to an absolute step target.
    ///
    /// Returns `None` when the angle is NaN or infinite.
    pub fn target_steps(&self, degrees: Degrees) -> Option<Steps> {
        self.limits
            .clamp(degrees)
            .map(|d| Steps::from_degrees(d, self.steps_per_degree))
    }

    /// Convert an absolute step count back to degrees.
    #[inline]
    pub fn steps_to_degrees(&self, steps: Steps) -> Degrees {
        steps.to_degrees(self.steps_per_degree)
    }
}
