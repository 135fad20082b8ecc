//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, AxisId, DriveConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Steps per degree are finite and positive
/// - Soft limits are valid (finite, min < max)
/// - Frequency range, speed scale and ramp split are usable
/// - Tick interval is non-zero
/// - Pan and tilt are routed to different motor channels
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_axis(AxisId::Pan, &config.pan)?;
    validate_axis(AxisId::Tilt, &config.tilt)?;
    validate_drive(&config.drive)?;

    if !config.channels.is_valid() {
        return Err(Error::Config(ConfigError::DuplicateChannel(config.channels.pan)));
    }

    Ok(())
}

fn validate_axis(axis: AxisId, config: &AxisConfig) -> Result<()> {
    if !config.steps_per_degree.is_finite() || config.steps_per_degree <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerDegree {
            axis,
            value: config.steps_per_degree,
        }));
    }

    if !config.limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidSoftLimits {
            axis,
            min: config.limits.min.0,
            max: config.limits.max.0,
        }));
    }

    Ok(())
}

fn validate_drive(drive: &DriveConfig) -> Result<()> {
    if drive.freq_min_hz == 0 || drive.freq_min_hz > drive.freq_max_hz {
        return Err(Error::Config(ConfigError::InvalidFrequencyRange {
            min: drive.freq_min_hz,
            max: drive.freq_max_hz,
        }));
    }

    if !drive.speed_scale.is_finite() || drive.speed_scale <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidSpeedScale(drive.speed_scale)));
    }

    let in_unit = |v: f32| v > 0.0 && v < 1.0;
    if !in_unit(drive.accel_fraction)
        || !in_unit(drive.decel_fraction)
        || drive.accel_fraction + drive.decel_fraction > 1.0
    {
        return Err(Error::Config(ConfigError::InvalidRampFractions {
            accel: drive.accel_fraction,
            decel: drive.decel_fraction,
        }));
    }

    if drive.tick_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidTickInterval(drive.tick_ms)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChannelMap, Degrees, MotorChannel, SoftLimits};

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&SystemConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_steps_per_degree() {
        let mut config = SystemConfig::default();
        config.tilt.steps_per_degree = -1.0; // Invalid!

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidStepsPerDegree { axis: AxisId::Tilt, .. }))
        ));
    }

    #[test]
    fn test_inverted_limits() {
        let mut config = SystemConfig::default();
        config.pan.limits = SoftLimits::new(Degrees(90.0), Degrees(-90.0));

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSoftLimits { axis: AxisId::Pan, .. }))
        ));
    }

    #[test]
    fn test_ramp_fractions_overlap() {
        let mut config = SystemConfig::default();
        config.drive.accel_fraction = 0.7;
        config.drive.decel_fraction = 0.4;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidRampFractions { .. }))
        ));
    }

    #[test]
    fn test_frequency_range() {
        let mut config = SystemConfig::default();
        config.drive.freq_min_hz = 5000;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidFrequencyRange { min: 5000, max: 4000 }))
        ));
    }

    #[test]
    fn test_zero_tick() {
        let mut config = SystemConfig::default();
        config.drive.tick_ms = 0;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidTickInterval(0)))
        ));
    }

    #[test]
    fn test_shared_channel() {
        let mut config = SystemConfig::default();
        config.channels = ChannelMap {
            pan: MotorChannel::M1,
            tilt: MotorChannel::M1,
        };

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicateChannel(MotorChannel::M1)))
        ));
    }
}
