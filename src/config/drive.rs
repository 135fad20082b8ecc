//! Drive timing and enable-line configuration shared by both axes.

use core::time::Duration;

use serde::Deserialize;

/// Drive settings from the `[drive]` table.
///
/// Every field has a default, so an empty table is a working configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// ENABLE line level that engages drive current (`true` = high).
    pub active_high_enable: bool,

    /// Keep drive current engaged while idle.
    pub hold_enable_when_idle: bool,

    /// Idle time after which the enable line is released (only when not holding).
    pub idle_disable_after_ms: u32,

    /// Multiplier applied to the base frequency range.
    pub speed_scale: f32,

    /// Base ramp start/end frequency in Hz, before scaling.
    pub freq_min_hz: u32,

    /// Base cruise frequency in Hz, before scaling.
    pub freq_max_hz: u32,

    /// Share of each move spent accelerating.
    pub accel_fraction: f32,

    /// Share of each move spent decelerating.
    pub decel_fraction: f32,

    /// Control-loop tick interval in milliseconds.
    pub tick_ms: u32,

    /// Maximum time shutdown waits for both axes to park.
    pub settle_ms: u32,
}

impl DriveConfig {
    /// Lowest drive frequency after scaling (at least 1 Hz).
    pub fn scaled_min_hz(&self) -> u32 {
        let scaled = libm::floorf(self.freq_min_hz as f32 * self.speed_scale);
        (scaled as u32).max(1)
    }

    /// Highest drive frequency after scaling (never below the minimum).
    pub fn scaled_max_hz(&self) -> u32 {
        let scaled = libm::floorf(self.freq_max_hz as f32 * self.speed_scale);
        (scaled as u32).max(self.scaled_min_hz())
    }

    /// Control-loop tick.
    #[inline]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms))
    }

    /// Idle release timeout.
    #[inline]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.idle_disable_after_ms))
    }

    /// Shutdown settle bound.
    #[inline]
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.settle_ms))
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            active_high_enable: true,
            hold_enable_when_idle: true,
            idle_disable_after_ms: 1500,
            speed_scale: 0.1,
            freq_min_hz: 500,
            freq_max_hz: 4000,
            accel_fraction: 0.4,
            decel_fraction: 0.4,
            tick_ms: 2,
            settle_ms: 2000,
        }
    }
}
