//! Tests for configuration validation through TOML.

use pantilt_stepper::config::{validate_config, AxisId, SystemConfig};
use pantilt_stepper::error::{ConfigError, Error};

fn parse(toml_str: &str) -> SystemConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a complete valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[pan]
steps_per_degree = 4.0

[pan.limits]
min_degrees = -120.0
max_degrees = 120.0

[tilt]
steps_per_degree = 10.0
invert_direction = true

[drive]
speed_scale = 0.25
tick_ms = 5

[channels]
pan = "m1"
tilt = "m2"
"#,
    );
    assert!(validate_config(&config).is_ok());
}

/// Test that empty configuration is valid.
#[test]
fn test_empty_config_is_valid() {
    let config = parse("");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a zero steps-per-degree ratio.
#[test]
fn test_zero_steps_per_degree() {
    let config = parse(
        r#"
[tilt]
steps_per_degree = 0.0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepsPerDegree {
            axis: AxisId::Tilt,
            ..
        }))
    ));
}

/// Test validation fails for invalid soft limits (min >= max).
#[test]
fn test_invalid_soft_limits() {
    let config = parse(
        r#"
[pan]
steps_per_degree = 4.0

[pan.limits]
min_degrees = 90.0
max_degrees = -90.0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSoftLimits {
            axis: AxisId::Pan,
            ..
        }))
    ));
}

/// Test validation fails when the ramps would overlap.
#[test]
fn test_overlapping_ramps() {
    let config = parse(
        r#"
[drive]
accel_fraction = 0.7
decel_fraction = 0.5
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidRampFractions { .. }))
    ));
}

/// Test validation fails for an inverted frequency range.
#[test]
fn test_inverted_frequency_range() {
    let config = parse(
        r#"
[drive]
freq_min_hz = 5000
freq_max_hz = 4000
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidFrequencyRange {
            min: 5000,
            max: 4000
        }))
    ));
}

/// Test validation fails for a negative speed scale.
#[test]
fn test_negative_speed_scale() {
    let config = parse(
        r#"
[drive]
speed_scale = -1.0
"#,
    );
    assert!(validate_config(&config).is_err());
}
