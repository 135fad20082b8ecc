//! Hardware port abstraction.
//!
//! An [`AxisPort`] is the only thing an axis worker talks to: enable line,
//! direction line, a free-running step frequency and an exact-count pulse
//! burst. How those reach the wire (GPIO + PWM, a daemon socket, nothing at
//! all) is up to the implementation.

mod gpio;
#[cfg(feature = "std")]
mod sim;

pub use gpio::{GpioPort, StepGenerator};
#[cfg(feature = "std")]
pub use sim::{PortEvent, SimulatedPort};

use crate::error::PortError;

/// Physical signaling for a single axis.
pub trait AxisPort {
    /// Prepare the device. Called once before the axis starts.
    ///
    /// A failure here is fatal: the controller refuses to construct.
    fn init(&mut self) -> Result<(), PortError> {
        Ok(())
    }

    /// Engage (`true`) or disengage drive current.
    fn set_enable(&mut self, enabled: bool) -> Result<(), PortError>;

    /// Set the direction line.
    fn set_direction(&mut self, forward: bool) -> Result<(), PortError>;

    /// Start or retune the free-running step output. `0` stops it.
    ///
    /// Called every control tick during a ramp.
    fn set_variable_frequency(&mut self, freq_hz: u32) -> Result<(), PortError>;

    /// Emit exactly `count` step pulses at `freq_hz`, returning once all of
    /// them have been sent.
    fn emit_fixed_pulses(&mut self, count: u32, freq_hz: u32) -> Result<(), PortError>;

    /// Give the device back. Called once at shutdown, after the enable line
    /// has been forced off.
    fn release(&mut self) {}
}
