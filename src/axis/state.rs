//! Axis state shared between the caller and the axis worker.

use core::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::config::Steps;

/// What the worker is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisPhase {
    /// Position equals target, or no move has been picked up yet.
    #[default]
    Idle,
    /// Executing a ramp-and-correct move.
    Ramping,
}

impl AxisPhase {
    /// Get the phase name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            AxisPhase::Idle => "Idle",
            AxisPhase::Ramping => "Ramping",
        }
    }
}

impl fmt::Display for AxisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of one axis.
///
/// `position` is written only by the axis worker, once per move. `target` is
/// written by callers; the newest write wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisState {
    /// Absolute step target.
    pub target: Steps,
    /// Steps actually sent, as of the last completed move.
    pub position: Steps,
    /// When the last move was committed.
    pub last_motion: Option<Instant>,
    /// Worker phase.
    pub phase: AxisPhase,
}

impl AxisState {
    /// Outstanding distance to the target.
    #[inline]
    pub fn delta(&self) -> i64 {
        self.target.0 - self.position.0
    }

    /// Idle with nothing left to do.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.phase == AxisPhase::Idle && self.delta() == 0
    }
}

/// State plus stop flag, behind one `Arc`.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    state: Mutex<AxisState>,
    stop: AtomicBool,
}

impl Shared {
    /// Short critical section; never held across port I/O.
    pub(crate) fn lock(&self) -> MutexGuard<'_, AxisState> {
        // The guarded data are plain integers, a panicking holder cannot leave them torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub(crate) fn stopping(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}
