//! Builder pattern for PanTiltController.

use crate::config::{MotorChannel, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::port::AxisPort;

use super::PanTiltController;

/// Builder for creating PanTiltController instances.
///
/// Ports are given per motor channel; the configuration's channel table
/// decides which one ends up driving pan and which tilt.
pub struct PanTiltControllerBuilder<P>
where
    P: AxisPort + Send + 'static,
{
    config: Option<SystemConfig>,
    m1_port: Option<P>,
    m2_port: Option<P>,
}

impl<P> Default for PanTiltControllerBuilder<P>
where
    P: AxisPort + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PanTiltControllerBuilder<P>
where
    P: AxisPort + Send + 'static,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            m1_port: None,
            m2_port: None,
        }
    }

    /// Set the system configuration. Defaults to [`SystemConfig::default`].
    pub fn config(mut self, config: SystemConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the port wired to motor channel M1.
    pub fn m1_port(mut self, port: P) -> Self {
        self.m1_port = Some(port);
        self
    }

    /// Set the port wired to motor channel M2.
    pub fn m2_port(mut self, port: P) -> Self {
        self.m2_port = Some(port);
        self
    }

    /// Set the port for a channel chosen at runtime.
    pub fn port(self, channel: MotorChannel, port: P) -> Self {
        match channel {
            MotorChannel::M1 => self.m1_port(port),
            MotorChannel::M2 => self.m2_port(port),
        }
    }

    /// Build the PanTiltController.
    ///
    /// # Errors
    ///
    /// Returns an error if a port is missing, the configuration is invalid,
    /// or either port fails to initialise.
    pub fn build(self) -> Result<PanTiltController<P>> {
        let m1 = self
            .m1_port
            .ok_or(Error::Config(ConfigError::MissingField("m1_port")))?;
        let m2 = self
            .m2_port
            .ok_or(Error::Config(ConfigError::MissingField("m2_port")))?;

        PanTiltController::new(self.config.unwrap_or_default(), m1, m2)
    }
}
