//! In-memory axis port (std only).
//!
//! Performs no I/O and records every call, so the controller can run on a
//! development host and tests can inspect exactly what the hardware would
//! have seen. Clones share one record.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::error::PortError;

use super::AxisPort;

/// One recorded port call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortEvent {
    /// `set_enable`
    Enable(bool),
    /// `set_direction`
    Direction {
        /// Requested direction
        forward: bool,
    },
    /// `set_variable_frequency`
    Frequency(u32),
    /// `emit_fixed_pulses`
    Burst {
        /// Pulses sent
        count: u32,
        /// Burst frequency in Hz
        freq_hz: u32,
    },
    /// `release`
    Released,
}

#[derive(Debug, Default)]
struct SimState {
    events: Vec<(Instant, PortEvent)>,
    enabled: bool,
    forward: bool,
    frequency_hz: u32,
    released: bool,
    unavailable: Option<heapless::String<64>>,
    fail_bursts: bool,
}

/// Recording port with shared state.
#[derive(Debug, Clone, Default)]
pub struct SimulatedPort {
    label: &'static str,
    state: Arc<Mutex<SimState>>,
}

impl SimulatedPort {
    /// Create a working port. `label` only shows up in log lines.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: Arc::default(),
        }
    }

    /// Create a port whose `init` fails, as if the device were missing.
    pub fn unavailable(label: &'static str, reason: &str) -> Self {
        let port = Self::new(label);
        port.lock().unavailable = Some(heapless::String::try_from(reason).unwrap_or_default());
        port
    }

    /// Make every following fixed burst fail.
    pub fn fail_bursts(&self, fail: bool) {
        self.lock().fail_bursts = fail;
    }

    /// Whether drive current is engaged.
    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Last direction written.
    pub fn is_forward(&self) -> bool {
        self.lock().forward
    }

    /// Frequency currently driven, in Hz.
    pub fn frequency(&self) -> u32 {
        self.lock().frequency_hz
    }

    /// Whether `release` has been called.
    pub fn is_released(&self) -> bool {
        self.lock().released
    }

    /// All calls so far, oldest first.
    pub fn events(&self) -> Vec<PortEvent> {
        self.lock().events.iter().map(|(_, e)| *e).collect()
    }

    /// Enable-line writes with their timestamps.
    pub fn enable_history(&self) -> Vec<(Instant, bool)> {
        self.lock()
            .events
            .iter()
            .filter_map(|(at, e)| match e {
                PortEvent::Enable(on) => Some((*at, *on)),
                _ => None,
            })
            .collect()
    }

    /// Fixed bursts as `(count, freq_hz)`.
    pub fn bursts(&self) -> Vec<(u32, u32)> {
        self.lock()
            .events
            .iter()
            .filter_map(|(_, e)| match e {
                PortEvent::Burst { count, freq_hz } => Some((*count, *freq_hz)),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, event: PortEvent) -> MutexGuard<'_, SimState> {
        let mut state = self.lock();
        state.events.push((Instant::now(), event));
        state
    }
}

impl AxisPort for SimulatedPort {
    fn init(&mut self) -> Result<(), PortError> {
        match &self.lock().unavailable {
            Some(reason) => Err(PortError::Unavailable(reason.clone())),
            None => {
                log::debug!("[sim {}] port ready", self.label);
                Ok(())
            }
        }
    }

    fn set_enable(&mut self, enabled: bool) -> Result<(), PortError> {
        self.record(PortEvent::Enable(enabled)).enabled = enabled;
        Ok(())
    }

    fn set_direction(&mut self, forward: bool) -> Result<(), PortError> {
        self.record(PortEvent::Direction { forward }).forward = forward;
        Ok(())
    }

    fn set_variable_frequency(&mut self, freq_hz: u32) -> Result<(), PortError> {
        self.record(PortEvent::Frequency(freq_hz)).frequency_hz = freq_hz;
        Ok(())
    }

    fn emit_fixed_pulses(&mut self, count: u32, freq_hz: u32) -> Result<(), PortError> {
        let mut state = self.lock();
        if state.fail_bursts {
            return Err(PortError::Waveform(
                heapless::String::try_from("simulated burst failure").unwrap_or_default(),
            ));
        }
        state.events.push((Instant::now(), PortEvent::Burst { count, freq_hz }));
        log::trace!("[sim {}] burst of {} pulses at {} Hz", self.label, count, freq_hz);
        Ok(())
    }

    fn release(&mut self) {
        self.record(PortEvent::Released).released = true;
        log::debug!("[sim {}] port released", self.label);
    }
}
