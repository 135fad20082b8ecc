//! Axis control loop.
//!
//! One worker thread per axis owns the port. Each outer iteration reads the
//! target; a non-zero delta is executed as one uninterruptible
//! ramp-and-correct move, after which the new position is committed exactly
//! once. A target written mid-move is picked up on the next iteration.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::config::{AxisConfig, AxisId, DriveConfig, Steps};
use crate::error::PortError;
use crate::motion::{Direction, RampExecutor, VelocityProfile};
use crate::port::AxisPort;

use super::state::{AxisPhase, Shared};

pub(crate) struct AxisWorker<P: AxisPort> {
    id: AxisId,
    config: AxisConfig,
    drive: DriveConfig,
    profile: VelocityProfile,
    port: P,
    shared: Arc<Shared>,
    /// Last level written to the enable line.
    enabled: bool,
}

impl<P: AxisPort> AxisWorker<P> {
    /// The port must already be initialised and disabled.
    pub(crate) fn new(
        id: AxisId,
        config: AxisConfig,
        drive: DriveConfig,
        port: P,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            id,
            config,
            profile: VelocityProfile::from_drive(&drive),
            drive,
            port,
            shared,
            enabled: false,
        }
    }

    /// Run until the stop flag is raised, then hand the port back.
    pub(crate) fn run(mut self) -> P {
        let tick = self.drive.tick();

        while !self.shared.stopping() {
            let (delta, start_target, last_motion) = {
                let mut state = self.shared.lock();
                let delta = state.delta();
                if delta != 0 {
                    state.phase = AxisPhase::Ramping;
                }
                (delta, state.target, state.last_motion)
            };

            if delta != 0 {
                let total = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
                self.run_move(total, Direction::from_steps(delta), start_target);
            } else {
                self.idle(last_motion);
                thread::sleep(tick);
            }
        }

        if let Err(e) = self.port.set_variable_frequency(0) {
            log::warn!("{}: could not stop step output: {}", self.id, e);
        }
        if !self.drive.hold_enable_when_idle {
            if let Err(e) = self.set_enable(false) {
                log::warn!("{}: could not release drive: {}", self.id, e);
            }
        }
        log::debug!("{} worker stopped", self.id);
        self.port
    }

    fn idle(&mut self, last_motion: Option<Instant>) {
        if self.drive.hold_enable_when_idle || !self.enabled {
            return;
        }
        let expired = last_motion.map_or(true, |t| t.elapsed() >= self.drive.idle_timeout());
        if expired {
            match self.set_enable(false) {
                Ok(()) => log::debug!("{}: idle, drive released", self.id),
                Err(e) => log::error!("{}: could not release drive: {}", self.id, e),
            }
        }
    }

    fn run_move(&mut self, total_steps: u32, direction: Direction, start_target: Steps) {
        log::debug!("{}: moving {} steps {:?}", self.id, total_steps, direction);

        let mut ramp = RampExecutor::new(self.profile, total_steps, self.drive.tick());
        let ramped = self.drive_ramp(&mut ramp, direction);
        let halted = self.port.set_variable_frequency(0);

        let correction = ramp.correction();
        let mut moved = correction.ramp_steps;

        let result = ramped.and(halted).and_then(|()| {
            if correction.burst_steps > 0 && !self.shared.stopping() {
                self.port
                    .emit_fixed_pulses(correction.burst_steps, correction.burst_frequency)?;
                moved += correction.burst_steps;
            }
            Ok(())
        });

        if let Err(e) = &result {
            log::error!(
                "{}: move aborted after {} of {} steps: {}",
                self.id,
                moved,
                total_steps,
                e
            );
        } else {
            log::debug!(
                "{}: moved {} steps ({} ramp + {} burst at {} Hz)",
                self.id,
                moved,
                correction.ramp_steps,
                moved - correction.ramp_steps,
                correction.burst_frequency
            );
        }

        self.commit(moved, direction, start_target, result.is_err());
    }

    fn drive_ramp(
        &mut self,
        ramp: &mut RampExecutor,
        direction: Direction,
    ) -> Result<(), PortError> {
        self.set_enable(true)?;
        self.port
            .set_direction(direction.is_forward() != self.config.invert_direction)?;
        self.port.set_variable_frequency(ramp.current_frequency())?;

        let tick = self.drive.tick();
        let mut last = Instant::now();
        while !ramp.is_complete() && !self.shared.stopping() {
            let freq = ramp.next_frequency();
            self.port.set_variable_frequency(freq)?;
            thread::sleep(tick);
            let now = Instant::now();
            ramp.advance(now - last);
            last = now;
        }
        Ok(())
    }

    /// The only place `position` is written.
    fn commit(&mut self, moved: u32, direction: Direction, start_target: Steps, failed: bool) {
        let mut state = self.shared.lock();
        state.position = Steps(state.position.0 + direction.sign() * i64::from(moved));
        state.last_motion = Some(Instant::now());
        state.phase = AxisPhase::Idle;
        // No automatic retry: a failed move gives up on its target unless a newer one arrived.
        if failed && state.target == start_target {
            state.target = state.position;
        }
    }

    fn set_enable(&mut self, enabled: bool) -> Result<(), PortError> {
        if self.enabled == enabled {
            return Ok(());
        }
        self.port.set_enable(enabled)?;
        self.enabled = enabled;
        Ok(())
    }
}
