//! Axis controller.
//!
//! [`Axis`] is the caller-side handle for one motor: it writes the target,
//! reads the position, and owns the worker thread that does all the timing
//! and port I/O.
//!
//! A move already in progress is never cut short by a new target; the worker
//! finishes it and then heads for whatever the target is at that point. The
//! latency of a retarget is therefore bounded by one full move.

mod state;
mod worker;

pub use state::{AxisPhase, AxisState};

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::{AxisConfig, AxisId, DriveConfig, Steps};
use crate::error::{Error, MotionError, Result};
use crate::port::AxisPort;

use state::Shared;
use worker::AxisWorker;

/// Handle to one axis and its worker thread.
pub struct Axis<P>
where
    P: AxisPort + Send + 'static,
{
    id: AxisId,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<P>>,
}

impl<P> Axis<P>
where
    P: AxisPort + Send + 'static,
{
    /// Initialise the port, disable the drive and start the worker.
    ///
    /// Position and target both start at zero: the axis is assumed homed.
    ///
    /// # Errors
    ///
    /// Returns the port error if the device cannot be initialised, or
    /// [`MotionError::WorkerSpawn`] if the thread cannot be created.
    pub fn spawn(id: AxisId, config: AxisConfig, drive: DriveConfig, mut port: P) -> Result<Self> {
        port.init()?;
        port.set_variable_frequency(0)?;
        port.set_enable(false)?;

        let shared = Arc::new(Shared::default());
        let worker = AxisWorker::new(id, config, drive, port, Arc::clone(&shared));
        let handle = thread::Builder::new()
            .name(format!("axis-{}", id))
            .spawn(move || worker.run())
            .map_err(|_| Error::Motion(MotionError::WorkerSpawn(id)))?;

        Ok(Self {
            id,
            shared,
            worker: Some(handle),
        })
    }

    /// Which axis this is.
    #[inline]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Replace the absolute step target. Returns immediately.
    pub fn move_to(&self, target: Steps) {
        self.shared.lock().target = target;
    }

    /// Position as of the last completed move.
    pub fn position(&self) -> Steps {
        self.shared.lock().position
    }

    /// Current target.
    pub fn target(&self) -> Steps {
        self.shared.lock().target
    }

    /// Consistent snapshot of target, position and phase.
    pub fn state(&self) -> AxisState {
        *self.shared.lock()
    }

    /// Idle at the target.
    pub fn is_settled(&self) -> bool {
        self.shared.lock().is_settled()
    }

    /// Whether the worker is still running.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Stop the worker and take the port back.
    ///
    /// The worker notices within one tick, or after a fixed burst already on
    /// the wire. Returns `Ok(None)` if the worker was already stopped.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::WorkerPanicked`] if the worker died; its port is lost.
    pub fn stop(&mut self) -> Result<Option<P>> {
        self.shared.request_stop();
        match self.worker.take() {
            Some(handle) => handle
                .join()
                .map(Some)
                .map_err(|_| Error::Motion(MotionError::WorkerPanicked(self.id))),
            None => Ok(None),
        }
    }
}

impl<P> Drop for Axis<P>
where
    P: AxisPort + Send + 'static,
{
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{PortEvent, SimulatedPort};
    use std::time::{Duration, Instant};

    fn fast_drive() -> DriveConfig {
        DriveConfig {
            speed_scale: 1.0,
            freq_min_hz: 20_000,
            freq_max_hz: 100_000,
            tick_ms: 1,
            ..DriveConfig::default()
        }
    }

    fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        done()
    }

    #[test]
    fn test_move_reaches_target_exactly() {
        let probe = SimulatedPort::new("m1");
        let axis = Axis::spawn(AxisId::Pan, AxisConfig::new(4.0), fast_drive(), probe.clone())
            .unwrap();

        axis.move_to(Steps(1234));
        assert!(wait_until(Duration::from_secs(5), || axis.is_settled()
            && axis.position() == Steps(1234)));

        axis.move_to(Steps(-17));
        assert!(wait_until(Duration::from_secs(5), || axis.is_settled()
            && axis.position() == Steps(-17)));
        assert!(!probe.is_forward());
    }

    #[test]
    fn test_newer_target_replaces_pending_one() {
        let probe = SimulatedPort::new("m1");
        // Long tick: both writes land while the worker sleeps between idle polls.
        let drive = DriveConfig {
            tick_ms: 200,
            ..fast_drive()
        };
        let axis = Axis::spawn(AxisId::Pan, AxisConfig::new(4.0), drive, probe.clone()).unwrap();
        thread::sleep(Duration::from_millis(50));

        axis.move_to(Steps(100));
        axis.move_to(Steps(50));
        assert!(wait_until(Duration::from_secs(5), || axis.is_settled()));

        assert_eq!(axis.position(), Steps(50));
        // 20 kHz over a 200 ms look-ahead covers the move: one 50-step burst.
        assert_eq!(probe.bursts().iter().map(|(n, _)| *n).sum::<u32>(), 50);
        let directions = probe
            .events()
            .into_iter()
            .filter(|e| matches!(e, PortEvent::Direction { .. }))
            .count();
        assert_eq!(directions, 1);
    }

    #[test]
    fn test_move_drives_port() {
        let probe = SimulatedPort::new("m1");
        let axis = Axis::spawn(AxisId::Tilt, AxisConfig::new(10.0), fast_drive(), probe.clone())
            .unwrap();

        axis.move_to(Steps(300));
        assert!(wait_until(Duration::from_secs(5), || axis.position() == Steps(300)));

        let events = probe.events();
        assert!(events.contains(&PortEvent::Enable(true)));
        assert!(events.contains(&PortEvent::Direction { forward: true }));
        assert_eq!(probe.frequency(), 0);
        assert!(probe.is_enabled(), "drive is held while idle by default");
    }

    #[test]
    fn test_inverted_direction() {
        let probe = SimulatedPort::new("m2");
        let config = AxisConfig {
            invert_direction: true,
            ..AxisConfig::new(4.0)
        };
        let axis = Axis::spawn(AxisId::Pan, config, fast_drive(), probe.clone()).unwrap();

        axis.move_to(Steps(50));
        assert!(wait_until(Duration::from_secs(5), || axis.position() == Steps(50)));
        assert!(!probe.is_forward());
    }

    #[test]
    fn test_failed_burst_abandons_target() {
        let probe = SimulatedPort::new("m1");
        probe.fail_bursts(true);
        let drive = DriveConfig {
            tick_ms: 5,
            ..fast_drive()
        };
        let axis = Axis::spawn(AxisId::Pan, AxisConfig::new(4.0), drive, probe.clone()).unwrap();

        // 20 kHz * 5 ms look-ahead = 100 steps: a 60-step move is all burst.
        axis.move_to(Steps(60));
        assert!(wait_until(Duration::from_secs(5), || axis.is_settled()));

        let state = axis.state();
        assert_eq!(state.target, state.position);
        assert!(state.position.0 < 60);
        assert!(probe.bursts().is_empty());
    }

    #[test]
    fn test_stop_returns_port_once() {
        let probe = SimulatedPort::new("m1");
        let mut axis =
            Axis::spawn(AxisId::Pan, AxisConfig::new(4.0), fast_drive(), probe).unwrap();

        assert!(axis.is_running());
        assert!(axis.stop().unwrap().is_some());
        assert!(axis.stop().unwrap().is_none());
        assert!(!axis.is_running());
    }

    #[test]
    fn test_unavailable_port_fails_spawn() {
        let port = SimulatedPort::unavailable("m1", "pigpiod not connected");
        let result = Axis::spawn(AxisId::Pan, AxisConfig::new(4.0), fast_drive(), port);
        assert!(matches!(
            result,
            Err(Error::Port(crate::error::PortError::Unavailable(_)))
        ));
    }
}
