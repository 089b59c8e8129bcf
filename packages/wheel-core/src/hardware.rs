//! Device seams.
//!
//! The wheel never talks to hardware directly. The robot program implements these traits for
//! its real devices, and tests implement them with in-memory mocks.

use core::fmt;

use snafu::Snafu;

use crate::{color::Color, telemetry::Telemetry};

/// A sensor that can sample the color of the panel wedge in front of it.
pub trait ColorSensor {
    /// Reads the current color sample.
    ///
    /// # Errors
    ///
    /// Returns a [`HardwareError`] if the sensor could not be read.
    fn read_color(&mut self) -> Result<Color, HardwareError>;
}

/// The motor that turns the panel.
pub trait Spinner {
    /// Drives the motor open loop at `speed`, a fraction of full power in `-1.0..=1.0`.
    ///
    /// # Errors
    ///
    /// Returns a [`HardwareError`] if the motor could not be commanded.
    fn set_speed(&mut self, speed: f64) -> Result<(), HardwareError>;

    /// Stops the motor.
    ///
    /// # Errors
    ///
    /// Returns a [`HardwareError`] if the motor could not be commanded.
    fn stop(&mut self) -> Result<(), HardwareError> {
        self.set_speed(0.0)
    }
}

/// Somewhere telemetry can be shown to the drive team.
pub trait Dashboard {
    /// Publishes the latest telemetry.
    ///
    /// # Errors
    ///
    /// Returns a [`HardwareError`] if the telemetry could not be displayed.
    fn publish(&mut self, telemetry: &Telemetry) -> Result<(), HardwareError>;
}

/// A small text display addressed by line.
pub trait TextScreen {
    /// Replaces `line` (counted from zero at the top) with `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`HardwareError`] if the screen could not be written.
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), HardwareError>;
}

/// Provides the latest game-specific message from the field management system.
pub trait GameDataSource {
    /// Returns the most recent message, or an empty string if none has arrived.
    ///
    /// # Errors
    ///
    /// Returns a [`HardwareError`] if the link to the field could not be read.
    fn game_message(&mut self) -> Result<&str, HardwareError>;
}

/// Identifies which device an error came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Device {
    /// The color sensor facing the panel.
    ColorSensor,
    /// The spinner motor.
    Motor,
    /// The dashboard telemetry is published to.
    Dashboard,
    /// The link carrying field management system messages.
    FieldLink,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ColorSensor => "color sensor",
            Self::Motor => "spinner motor",
            Self::Dashboard => "dashboard",
            Self::FieldLink => "field link",
        })
    }
}

/// Errors reported by device implementations.
#[derive(Debug, Snafu, Clone, Copy, Eq, PartialEq)]
pub enum HardwareError {
    /// Nothing is plugged in where the device was expected.
    #[snafu(display("{device} is disconnected"))]
    Disconnected {
        /// The missing device.
        device: Device,
    },

    /// The wrong kind of device is plugged in.
    #[snafu(display("{device} port has the wrong kind of device plugged in"))]
    IncorrectDevice {
        /// The device that was expected.
        device: Device,
    },

    /// The device did not respond in time.
    #[snafu(display("{device} is busy"))]
    Busy {
        /// The device that was busy.
        device: Device,
    },

    /// The device exists but is not usable right now.
    #[snafu(display("{device} is unavailable"))]
    Unavailable {
        /// The unavailable device.
        device: Device,
    },
}

impl HardwareError {
    /// The device the error came from.
    #[must_use]
    pub const fn device(&self) -> Device {
        match *self {
            Self::Disconnected { device }
            | Self::IncorrectDevice { device }
            | Self::Busy { device }
            | Self::Unavailable { device } => device,
        }
    }
}
