//! Logical axis to motor channel routing.
//!
//! Which physical driver channel carries "pan" and which carries "tilt" depends
//! on how the HAT is wired, so it lives in exactly one named table.

use core::fmt;

use serde::Deserialize;

/// Logical axis of the mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    /// Horizontal rotation.
    Pan,
    /// Vertical rotation.
    Tilt,
}

impl AxisId {
    /// Lowercase name, used for thread names and log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            AxisId::Pan => "pan",
            AxisId::Tilt => "tilt",
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical motor channel on the driver board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum MotorChannel {
    /// First driver channel.
    M1,
    /// Second driver channel.
    M2,
}

impl fmt::Display for MotorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorChannel::M1 => f.write_str("M1"),
            MotorChannel::M2 => f.write_str("M2"),
        }
    }
}

/// Pan/tilt to motor channel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChannelMap {
    /// Channel driving the pan axis.
    pub pan: MotorChannel,
    /// Channel driving the tilt axis.
    pub tilt: MotorChannel,
}

impl ChannelMap {
    /// Channel assigned to a logical axis.
    pub fn channel(&self, axis: AxisId) -> MotorChannel {
        match axis {
            AxisId::Pan => self.pan,
            AxisId::Tilt => self.tilt,
        }
    }

    /// True when each axis has its own channel.
    pub fn is_valid(&self) -> bool {
        self.pan != self.tilt
    }

    /// Split per-channel resources into `(pan, tilt)` order.
    ///
    /// Only meaningful for a valid map; an invalid one still hands out both
    /// values, M1 first.
    pub fn route<T>(&self, m1: T, m2: T) -> (T, T) {
        match self.pan {
            MotorChannel::M2 => (m2, m1),
            MotorChannel::M1 => (m1, m2),
        }
    }
}

impl Default for ChannelMap {
    /// The HAT this was built for has the pan mechanism on M2.
    fn default() -> Self {
        Self {
            pan: MotorChannel::M2,
            tilt: MotorChannel::M1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_default() {
        let map = ChannelMap::default();
        assert_eq!(map.route("m1", "m2"), ("m2", "m1"));
        assert_eq!(map.channel(AxisId::Pan), MotorChannel::M2);
    }

    #[test]
    fn test_route_straight() {
        let map = ChannelMap {
            pan: MotorChannel::M1,
            tilt: MotorChannel::M2,
        };
        assert_eq!(map.route(1, 2), (1, 2));
        assert!(map.is_valid());
    }

    #[test]
    fn test_duplicate_is_invalid() {
        let map = ChannelMap {
            pan: MotorChannel::M1,
            tilt: MotorChannel::M1,
        };
        assert!(!map.is_valid());
    }
}
