//! System configuration - root configuration structure.

use serde::Deserialize;

use super::axis::AxisConfig;
use super::channels::{AxisId, ChannelMap};
use super::drive::DriveConfig;

/// Root configuration structure from TOML.
///
/// Built once at startup and never mutated once the controller is running.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SystemConfig {
    /// Pan axis geometry.
    #[serde(default = "default_pan")]
    pub pan: AxisConfig,

    /// Tilt axis geometry.
    #[serde(default = "default_tilt")]
    pub tilt: AxisConfig,

    /// Shared drive timing.
    #[serde(default)]
    pub drive: DriveConfig,

    /// Logical axis to motor channel table.
    #[serde(default)]
    pub channels: ChannelMap,
}

fn default_pan() -> AxisConfig {
    AxisConfig::new(4.0)
}

fn default_tilt() -> AxisConfig {
    AxisConfig::new(10.0)
}

impl SystemConfig {
    /// Geometry of one axis.
    pub fn axis(&self, axis: AxisId) -> &AxisConfig {
        match axis {
            AxisId::Pan => &self.pan,
            AxisId::Tilt => &self.tilt,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            pan: default_pan(),
            tilt: default_tilt(),
            drive: DriveConfig::default(),
            channels: ChannelMap::default(),
        }
    }
}
