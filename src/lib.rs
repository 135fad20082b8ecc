//! # pantilt-stepper
//!
//! Two-axis (pan/tilt) stepper controller with S-curve ramps and exact step
//! bookkeeping.
//!
//! ## Features
//!
//! - **Non-blocking commands**: `pan`/`tilt` only replace a target; one worker thread per axis does the moving
//! - **Exact step counts**: a variable-frequency ramp followed by a fixed-count burst lands every move on its target
//! - **Soft limits**: commanded angles are clamped per axis before conversion to steps
//! - **Hardware agnostic**: motors are driven through the [`AxisPort`] trait; [`GpioPort`] adapts embedded-hal 1.0 pins
//! - **Configuration-driven**: geometry, drive timing and channel routing load from TOML
//! - **no_std core**: units, config validation and the velocity profile build without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pantilt_stepper::{PanTiltController, SimulatedPort};
//!
//! let config = pantilt_stepper::load_config("pantilt.toml")?;
//!
//! let mut controller = PanTiltController::builder()
//!     .config(config)
//!     .m1_port(SimulatedPort::new("m1"))
//!     .m2_port(SimulatedPort::new("m2"))
//!     .build()?;
//!
//! controller.pan(45.0)?;
//! controller.tilt(-10.0)?;
//! controller.shutdown()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables the threaded controller, the simulated port and TOML loading
//! - `defmt`: Enables defmt formatting for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod port;

// Threaded control (std only)
#[cfg(feature = "std")]
pub mod axis;
#[cfg(feature = "std")]
pub mod controller;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, AxisId, ChannelMap, DriveConfig, MotorChannel, SoftLimits, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Direction, RampExecutor, VelocityProfile};
pub use port::{AxisPort, GpioPort, StepGenerator};

#[cfg(feature = "std")]
pub use axis::{Axis, AxisPhase, AxisState};
#[cfg(feature = "std")]
pub use controller::{PanTiltController, PanTiltControllerBuilder};
#[cfg(feature = "std")]
pub use port::{PortEvent, SimulatedPort};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, Steps};
