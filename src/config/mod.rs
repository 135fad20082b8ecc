//! Configuration module for pantilt-stepper.
//!
//! Provides types for loading and validating axis geometry, drive timing and
//! channel routing from TOML files (with `std` feature) or built in code.

mod axis;
mod channels;
mod drive;
mod limits;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::AxisConfig;
pub use channels::{AxisId, ChannelMap, MotorChannel};
pub use drive::DriveConfig;
pub use limits::SoftLimits;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Steps};
