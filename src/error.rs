//! Error types for pantilt-stepper.
//!
//! Provides unified error handling across configuration, hardware ports, and motion control.

use core::fmt;

use crate::config::{AxisId, MotorChannel};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all pantilt-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Hardware port error
    Port(PortError),
    /// Motion command or axis worker error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Steps per degree must be finite and > 0
    InvalidStepsPerDegree {
        /// Axis the ratio belongs to
        axis: AxisId,
        /// Offending value
        value: f32,
    },
    /// Invalid soft limits (min must be < max, both finite)
    InvalidSoftLimits {
        /// Axis the limits belong to
        axis: AxisId,
        /// Minimum limit value
        min: f32,
        /// Maximum limit value
        max: f32,
    },
    /// Invalid base frequency range (min must be > 0 and <= max)
    InvalidFrequencyRange {
        /// Configured minimum frequency in Hz
        min: u32,
        /// Configured maximum frequency in Hz
        max: u32,
    },
    /// Speed scale must be finite and > 0
    InvalidSpeedScale(f32),
    /// Ramp fractions must each be in (0, 1) and sum to at most 1
    InvalidRampFractions {
        /// Acceleration share of the move
        accel: f32,
        /// Deceleration share of the move
        decel: f32,
    },
    /// Control-loop tick must be at least 1 ms
    InvalidTickInterval(u32),
    /// Pan and tilt are wired to the same motor channel
    DuplicateChannel(MotorChannel),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Hardware port errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PortError {
    /// The device could not be opened or is not present
    Unavailable(heapless::String<64>),
    /// A GPIO pin write failed
    PinError,
    /// The fixed pulse waveform could not be built or sent
    Waveform(heapless::String<64>),
}

/// Motion command and axis worker errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Requested angle is NaN or infinite
    NonFiniteAngle {
        /// Axis the command was addressed to
        axis: AxisId,
        /// Rejected value
        value: f32,
    },
    /// The axis worker thread could not be started
    WorkerSpawn(AxisId),
    /// The axis worker thread panicked
    WorkerPanicked(AxisId),
    /// The controller has been shut down and no longer accepts commands
    Stopped(AxisId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Port(e) => write!(f, "Port error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepsPerDegree { axis, value } => {
                write!(f, "Invalid steps per degree for {}: {}. Must be > 0", axis, value)
            }
            ConfigError::InvalidSoftLimits { axis, min, max } => {
                write!(f, "Invalid soft limits for {}: min ({}) must be < max ({})", axis, min, max)
            }
            ConfigError::InvalidFrequencyRange { min, max } => {
                write!(f, "Invalid frequency range: {} Hz..{} Hz. Need 0 < min <= max", min, max)
            }
            ConfigError::InvalidSpeedScale(v) => write!(f, "Invalid speed scale: {}. Must be > 0", v),
            ConfigError::InvalidRampFractions { accel, decel } => write!(
                f,
                "Invalid ramp fractions: accel {} / decel {}. Each must be in (0, 1), sum <= 1",
                accel, decel
            ),
            ConfigError::InvalidTickInterval(ms) => {
                write!(f, "Invalid tick interval: {} ms. Must be >= 1", ms)
            }
            ConfigError::DuplicateChannel(ch) => {
                write!(f, "Pan and tilt are both mapped to motor channel {}", ch)
            }
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::Unavailable(msg) => write!(f, "Device unavailable: {}", msg),
            PortError::PinError => write!(f, "GPIO pin operation failed"),
            PortError::Waveform(msg) => write!(f, "Pulse waveform failed: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::NonFiniteAngle { axis, value } => {
                write!(f, "Rejected non-finite angle {} for {}", value, axis)
            }
            MotionError::WorkerSpawn(axis) => write!(f, "Could not start {} worker", axis),
            MotionError::WorkerPanicked(axis) => write!(f, "{} worker panicked", axis),
            MotionError::Stopped(axis) => write!(f, "{} is shut down", axis),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PortError> for Error {
    fn from(e: PortError) -> Self {
        Error::Port(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for PortError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
