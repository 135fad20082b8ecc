//! GPIO-backed axis port.
//!
//! Generic over embedded-hal 1.0 output pins for ENABLE and DIR, plus a
//! [`StepGenerator`] for the STEP line, which needs hardware help: a PWM
//! channel for the free-running ramp and a counted waveform for the burst.

use embedded_hal::digital::OutputPin;

use crate::error::PortError;
use crate::motion::{Direction, MAX_BURST_FREQUENCY_HZ};

use super::AxisPort;

/// STEP line driver.
pub trait StepGenerator {
    /// Drive a 50% duty square wave at `freq_hz`; `0` stops it.
    fn set_frequency(&mut self, freq_hz: u32) -> Result<(), PortError>;

    /// Send exactly `count` pulses at `freq_hz` and wait until they are out.
    fn emit_pulses(&mut self, count: u32, freq_hz: u32) -> Result<(), PortError>;
}

/// Axis port built from two output pins and a step generator.
pub struct GpioPort<EN, DIR, G>
where
    EN: OutputPin,
    DIR: OutputPin,
    G: StepGenerator,
{
    /// ENABLE pin.
    enable_pin: EN,

    /// DIR pin (high = forward).
    dir_pin: DIR,

    /// STEP line driver.
    steps: G,

    /// Pin level that engages drive current.
    active_high_enable: bool,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,
}

impl<EN, DIR, G> GpioPort<EN, DIR, G>
where
    EN: OutputPin,
    DIR: OutputPin,
    G: StepGenerator,
{
    /// Create a port. `active_high_enable` is the ENABLE level that engages the driver.
    pub fn new(enable_pin: EN, dir_pin: DIR, steps: G, active_high_enable: bool) -> Self {
        Self {
            enable_pin,
            dir_pin,
            steps,
            active_high_enable,
            current_direction: None,
        }
    }

    /// Take the pins and generator back.
    pub fn into_parts(self) -> (EN, DIR, G) {
        (self.enable_pin, self.dir_pin, self.steps)
    }
}

impl<EN, DIR, G> AxisPort for GpioPort<EN, DIR, G>
where
    EN: OutputPin,
    DIR: OutputPin,
    G: StepGenerator,
{
    fn set_enable(&mut self, enabled: bool) -> Result<(), PortError> {
        let high = enabled == self.active_high_enable;
        if high {
            self.enable_pin.set_high().map_err(|_| PortError::PinError)
        } else {
            self.enable_pin.set_low().map_err(|_| PortError::PinError)
        }
    }

    fn set_direction(&mut self, forward: bool) -> Result<(), PortError> {
        let direction = if forward {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        if forward {
            self.dir_pin.set_high().map_err(|_| PortError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| PortError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    fn set_variable_frequency(&mut self, freq_hz: u32) -> Result<(), PortError> {
        self.steps.set_frequency(freq_hz)
    }

    fn emit_fixed_pulses(&mut self, count: u32, freq_hz: u32) -> Result<(), PortError> {
        if count == 0 {
            return Ok(());
        }
        self.steps
            .emit_pulses(count, freq_hz.clamp(1, MAX_BURST_FREQUENCY_HZ))
    }

    fn release(&mut self) {
        if let Err(e) = self.steps.set_frequency(0) {
            log::warn!("could not stop step generator on release: {}", e);
        }
    }
}
