//! Motion module for pantilt-stepper.
//!
//! Provides the velocity profile and the ramp bookkeeping used by each axis worker.

mod executor;
mod profile;

pub use executor::{Correction, RampExecutor, MAX_BURST_FREQUENCY_HZ};
pub use profile::{
    scurve, trapezoid_fraction, trapezoid_fraction_with, Direction, VelocityProfile,
    ACCEL_FRACTION, DECEL_FRACTION,
};
