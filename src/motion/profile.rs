//! Velocity profile calculation.
//!
//! Maps "fraction of the move completed" to a drive frequency: a trapezoidal
//! envelope (accelerate / cruise / decelerate) eased by a half-cosine S-curve.
//! Everything here is pure and deterministic.

use core::f32::consts::PI;

use libm::cosf;

use crate::config::DriveConfig;

/// Default share of a move spent accelerating.
pub const ACCEL_FRACTION: f32 = 0.4;

/// Default share of a move spent decelerating.
pub const DECEL_FRACTION: f32 = 0.4;

/// Direction of axis motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward increasing step count.
    Forward,
    /// Toward decreasing step count.
    Reverse,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// True for [`Direction::Forward`].
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

/// Half-cosine easing: `0.5 - 0.5 * cos(pi * u)`.
///
/// Input is clamped to `[0, 1]`. Monotonic, with zero slope at both ends.
#[inline]
pub fn scurve(u: f32) -> f32 {
    let u = u.clamp(0.0, 1.0);
    0.5 - 0.5 * cosf(PI * u)
}

/// Trapezoidal envelope with the default 40% / 20% / 40% split.
///
/// See [`trapezoid_fraction_with`].
#[inline]
pub fn trapezoid_fraction(steps_done: f32, total_steps: i64) -> f32 {
    trapezoid_fraction_with(steps_done, total_steps, ACCEL_FRACTION, DECEL_FRACTION)
}

/// Trapezoidal envelope in `[0, 1]` for a configurable ramp split.
///
/// Rises linearly over the first `accel_frac` of the move, holds `1.0`
/// through the cruise section and falls linearly over the last `decel_frac`.
/// A non-positive `total_steps` is a degenerate move and yields `1.0`.
pub fn trapezoid_fraction_with(
    steps_done: f32,
    total_steps: i64,
    accel_frac: f32,
    decel_frac: f32,
) -> f32 {
    if total_steps <= 0 {
        return 1.0;
    }

    let u = (steps_done / total_steps as f32).clamp(0.0, 1.0);
    if u < accel_frac {
        u / accel_frac
    } else if u > 1.0 - decel_frac {
        (1.0 - u) / decel_frac
    } else {
        1.0
    }
}

/// Frequency envelope for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityProfile {
    /// Frequency at the start and end of every move, in Hz.
    pub f_min: u32,
    /// Cruise frequency, in Hz.
    pub f_max: u32,
    /// Share of the move spent accelerating.
    pub accel_fraction: f32,
    /// Share of the move spent decelerating.
    pub decel_fraction: f32,
}

impl VelocityProfile {
    /// Create a profile with the default ramp split.
    pub fn new(f_min: u32, f_max: u32) -> Self {
        let f_min = f_min.max(1);
        Self {
            f_min,
            f_max: f_max.max(f_min),
            accel_fraction: ACCEL_FRACTION,
            decel_fraction: DECEL_FRACTION,
        }
    }

    /// Derive the scaled frequency range and ramp split from drive settings.
    pub fn from_drive(drive: &DriveConfig) -> Self {
        Self {
            f_min: drive.scaled_min_hz(),
            f_max: drive.scaled_max_hz(),
            accel_fraction: drive.accel_fraction,
            decel_fraction: drive.decel_fraction,
        }
    }

    /// Envelope value at the given progress.
    #[inline]
    pub fn envelope(&self, steps_done: f32, total_steps: i64) -> f32 {
        trapezoid_fraction_with(steps_done, total_steps, self.accel_fraction, self.decel_fraction)
    }

    /// Target drive frequency at the given progress, in Hz (never below 1).
    pub fn frequency_at(&self, steps_done: f32, total_steps: i64) -> u32 {
        let k = scurve(self.envelope(steps_done, total_steps));
        let span = self.f_max.saturating_sub(self.f_min) as f32;
        let freq = libm::roundf(self.f_min as f32 + span * k) as u32;
        freq.clamp(self.f_min, self.f_max.max(self.f_min)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_scurve_endpoints() {
        assert!(scurve(0.0).abs() < EPS);
        assert!((scurve(1.0) - 1.0).abs() < EPS);
        assert!((scurve(0.5) - 0.5).abs() < EPS);
        // clamped outside [0, 1]
        assert!(scurve(-3.0).abs() < EPS);
        assert!((scurve(7.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_scurve_symmetry() {
        for i in 0..=20 {
            let u = i as f32 / 20.0;
            assert!((scurve(u) + scurve(1.0 - u) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_trapezoid_boundaries() {
        assert_eq!(trapezoid_fraction(0.0, 100), 0.0);
        assert_eq!(trapezoid_fraction(50.0, 100), 1.0);
        assert!((trapezoid_fraction(20.0, 100) - 0.5).abs() < EPS);
        assert!((trapezoid_fraction(80.0, 100) - 0.5).abs() < EPS);
        assert_eq!(trapezoid_fraction(100.0, 100), 0.0);
    }

    #[test]
    fn test_trapezoid_degenerate() {
        assert_eq!(trapezoid_fraction(0.0, 0), 1.0);
        assert_eq!(trapezoid_fraction(42.0, 0), 1.0);
        assert_eq!(trapezoid_fraction(5.0, -10), 1.0);
    }

    #[test]
    fn test_cruise_plateau() {
        for s in 40..=60 {
            assert_eq!(trapezoid_fraction(s as f32, 100), 1.0, "s = {}", s);
        }
    }

    #[test]
    fn test_frequency_range() {
        let profile = VelocityProfile::new(50, 400);

        assert_eq!(profile.frequency_at(0.0, 1000), 50);
        assert_eq!(profile.frequency_at(500.0, 1000), 400);
        let quarter = profile.frequency_at(100.0, 1000);
        assert!(quarter > 50 && quarter < 400);
    }

    #[test]
    fn test_profile_from_drive() {
        let profile = VelocityProfile::from_drive(&DriveConfig::default());
        assert_eq!(profile.f_min, 50);
        assert_eq!(profile.f_max, 400);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_steps(10), Direction::Forward);
        assert_eq!(Direction::from_steps(-10), Direction::Reverse);
        assert_eq!(Direction::Reverse.sign(), -1);
        assert!(Direction::Forward.is_forward());
    }
}
