//! Soft limit configuration.

use serde::Deserialize;

use super::units::Degrees;

/// Closed angular travel range for one axis, in degrees.
///
/// Commands outside the range are clamped onto it, never rejected; the clamp
/// is idempotent and always applied before any step computation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SoftLimits {
    /// Minimum allowed position in degrees.
    #[serde(rename = "min_degrees")]
    pub min: Degrees,

    /// Maximum allowed position in degrees.
    #[serde(rename = "max_degrees")]
    pub max: Degrees,
}

impl SoftLimits {
    /// Create new soft limits.
    pub fn new(min: Degrees, max: Degrees) -> Self {
        Self { min, max }
    }

    /// Symmetric limits `[-span, +span]`.
    pub fn symmetric(span: f32) -> Self {
        Self::new(Degrees(-span), Degrees(span))
    }

    /// Check if limits are valid (both finite, min < max).
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.0 < self.max.0
    }

    /// Clamp a finite target onto the range.
    ///
    /// Returns `None` for NaN or infinite input so a corrupt value can never
    /// reach a step computation.
    pub fn clamp(&self, target: Degrees) -> Option<Degrees> {
        if !target.is_finite() {
            return None;
        }
        if target.0 < self.min.0 {
            Some(self.min)
        } else if target.0 > self.max.0 {
            Some(self.max)
        } else {
            Some(target)
        }
    }
}

impl Default for SoftLimits {
    fn default() -> Self {
        Self::symmetric(90.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_limits_clamp() {
        let limits = SoftLimits::symmetric(90.0);

        assert_eq!(limits.clamp(Degrees(0.0)), Some(Degrees(0.0)));
        assert_eq!(limits.clamp(Degrees(200.0)), Some(Degrees(90.0)));
        assert_eq!(limits.clamp(Degrees(-360.0)), Some(Degrees(-90.0)));
        assert_eq!(limits.clamp(Degrees(90.0)), Some(Degrees(90.0)));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let limits = SoftLimits::new(Degrees(-30.0), Degrees(75.0));
        for v in [-1000.0, -30.0, 0.0, 12.5, 75.0, 1e9] {
            let once = limits.clamp(Degrees(v)).unwrap();
            assert_eq!(limits.clamp(once), Some(once));
        }
    }

    #[test]
    fn test_clamp_rejects_non_finite() {
        let limits = SoftLimits::default();
        assert!(limits.clamp(Degrees(f32::NAN)).is_none());
        assert!(limits.clamp(Degrees(f32::INFINITY)).is_none());
        assert!(limits.clamp(Degrees(f32::NEG_INFINITY)).is_none());
    }

    #[test]
    fn test_validity() {
        assert!(SoftLimits::default().is_valid());
        assert!(!SoftLimits::new(Degrees(10.0), Degrees(10.0)).is_valid());
        assert!(!SoftLimits::new(Degrees(f32::NAN), Degrees(10.0)).is_valid());
    }
}
