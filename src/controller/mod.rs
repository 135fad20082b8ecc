//! Pan/tilt controller.
//!
//! Composes two [`Axis`] handles behind a degree-space API. Angles are
//! clamped to each axis's soft limits and converted to absolute step targets;
//! positions are converted back on the way out.
//!
//! # Example
//!
//! ```rust,ignore
//! use pantilt_stepper::{PanTiltController, SimulatedPort, SystemConfig};
//!
//! let mut controller = PanTiltController::builder()
//!     .config(SystemConfig::default())
//!     .m1_port(SimulatedPort::new("m1"))
//!     .m2_port(SimulatedPort::new("m2"))
//!     .build()?;
//!
//! controller.pan(45.0)?;
//! controller.wait_settled(Duration::from_secs(5));
//! let (pan, tilt) = controller.get_position();
//! controller.shutdown()?;
//! ```

mod builder;

pub use builder::PanTiltControllerBuilder;

use std::thread;
use std::time::{Duration, Instant};

use crate::axis::Axis;
use crate::config::{validate_config, AxisId, Degrees, Steps, SystemConfig};
use crate::error::{Error, MotionError, Result};
use crate::port::AxisPort;

/// Two-axis controller.
///
/// Dropping it runs [`shutdown`](Self::shutdown) if that has not happened yet.
pub struct PanTiltController<P>
where
    P: AxisPort + Send + 'static,
{
    config: SystemConfig,
    pan: Axis<P>,
    tilt: Axis<P>,
    shut_down: bool,
}

impl<P> PanTiltController<P>
where
    P: AxisPort + Send + 'static,
{
    /// Create a builder.
    pub fn builder() -> PanTiltControllerBuilder<P> {
        PanTiltControllerBuilder::new()
    }

    /// Validate `config`, route the two channel ports to pan and tilt, and
    /// start both axes.
    ///
    /// # Errors
    ///
    /// Fails as a whole if the configuration is invalid or either port cannot
    /// be initialised; an axis already started is stopped again.
    pub fn new(config: SystemConfig, m1_port: P, m2_port: P) -> Result<Self> {
        validate_config(&config)?;

        let (pan_port, tilt_port) = config.channels.route(m1_port, m2_port);
        let pan = Axis::spawn(AxisId::Pan, config.pan, config.drive, pan_port)?;
        let tilt = Axis::spawn(AxisId::Tilt, config.tilt, config.drive, tilt_port)?;

        log::info!(
            "pan/tilt controller ready (pan on {}, tilt on {}, {}-{} Hz)",
            config.channels.pan,
            config.channels.tilt,
            config.drive.scaled_min_hz(),
            config.drive.scaled_max_hz()
        );

        Ok(Self {
            config,
            pan,
            tilt,
            shut_down: false,
        })
    }

    /// The configuration the controller was built with.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Aim the pan axis. Returns the step target commanded.
    ///
    /// Out-of-range angles are clamped; the call never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::NonFiniteAngle`] for NaN or infinite input and
    /// [`MotionError::Stopped`] once the controller has been shut down.
    pub fn pan(&self, degrees: f32) -> Result<Steps> {
        self.command(AxisId::Pan, Degrees(degrees))
    }

    /// Aim the tilt axis. See [`pan`](Self::pan).
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::NonFiniteAngle`] for NaN or infinite input and
    /// [`MotionError::Stopped`] once the controller has been shut down.
    pub fn tilt(&self, degrees: f32) -> Result<Steps> {
        self.command(AxisId::Tilt, Degrees(degrees))
    }

    /// `(pan, tilt)` as of each axis's last completed move.
    pub fn get_position(&self) -> (Degrees, Degrees) {
        (
            self.config.pan.steps_to_degrees(self.pan.position()),
            self.config.tilt.steps_to_degrees(self.tilt.position()),
        )
    }

    /// `(pan, tilt)` currently commanded.
    pub fn target_position(&self) -> (Degrees, Degrees) {
        (
            self.config.pan.steps_to_degrees(self.pan.target()),
            self.config.tilt.steps_to_degrees(self.tilt.target()),
        )
    }

    /// Both axes idle at their targets.
    pub fn is_settled(&self) -> bool {
        self.pan.is_settled() && self.tilt.is_settled()
    }

    /// Block until both axes settle or `timeout` passes. Returns whether they settled.
    pub fn wait_settled(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let poll = self.config.drive.tick();
        loop {
            if self.is_settled() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(poll);
        }
    }

    /// Park both axes at 0° (clamped), stop the workers and switch the drives off.
    ///
    /// Waits at most `settle_ms` for the park; the enable lines are forced
    /// off and the ports released whether or not it finished. Calling this
    /// again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the first worker or port error met; the remaining steps are
    /// still carried out.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;

        log::info!("shutting down: parking both axes");
        for id in [AxisId::Pan, AxisId::Tilt] {
            if let Some(home) = self.config.axis(id).target_steps(Degrees(0.0)) {
                self.axis(id).move_to(home);
            }
        }
        if !self.wait_settled(self.config.drive.settle_timeout()) {
            log::warn!(
                "axes not parked after {} ms, stopping anyway",
                self.config.drive.settle_ms
            );
        }

        let mut first_error = None;
        for axis in [&mut self.pan, &mut self.tilt] {
            let id = axis.id();
            let result = axis.stop().and_then(|port| match port {
                Some(mut port) => power_down(&mut port),
                None => Ok(()),
            });
            if let Err(e) = result {
                log::error!("{} shutdown: {}", id, e);
                first_error.get_or_insert(e);
            }
        }

        log::info!("pan/tilt controller shut down");
        first_error.map_or(Ok(()), Err)
    }

    fn axis(&self, id: AxisId) -> &Axis<P> {
        match id {
            AxisId::Pan => &self.pan,
            AxisId::Tilt => &self.tilt,
        }
    }

    fn command(&self, id: AxisId, degrees: Degrees) -> Result<Steps> {
        if self.shut_down {
            return Err(Error::Motion(MotionError::Stopped(id)));
        }
        let config = self.config.axis(id);
        let target = config.target_steps(degrees).ok_or(Error::Motion(
            MotionError::NonFiniteAngle {
                axis: id,
                value: degrees.0,
            },
        ))?;

        self.axis(id).move_to(target);
        log::info!(
            "{} -> {}° ({} steps)",
            id,
            config.steps_to_degrees(target).0,
            target.0
        );
        Ok(target)
    }
}

/// Stop output, drop the enable line and hand the device back.
///
/// `release` runs even if one of the writes fails.
fn power_down<P: AxisPort>(port: &mut P) -> Result<()> {
    let result = port
        .set_variable_frequency(0)
        .and(port.set_enable(false));
    port.release();
    result.map_err(Error::from)
}

impl<P> Drop for PanTiltController<P>
where
    P: AxisPort + Send + 'static,
{
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("shutdown on drop failed: {}", e);
        }
    }
}
