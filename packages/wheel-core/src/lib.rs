//! Color matching and spin control for the color wheel manipulator.
//!
//! # Overview
//!
//! The manipulator reads color samples from a sensor pointed at the control panel, classifies
//! them against a small palette of calibrated reference colors, and spins the panel with a
//! single motor. Two automatic behaviors are provided:
//!
//! - **Rotation control** spins the panel until a set number of color transitions has been
//!   observed (see [`rotation`]).
//! - **Position control** spins the panel until the sensor sees the color derived from the
//!   field management system's game-specific message (see [`position`] and [`game_data`]).
//!
//! Nothing in this crate talks to hardware directly. Devices are reached through the traits
//! in [`hardware`], which the robot program implements for its sensors and motors and which
//! tests implement with mocks. [`driver`] maps the drive team's controls onto the wheel and
//! [`dashboard`] shows its [`Telemetry`] on a small text screen.
//!
//! ```
//! use wheel_core::{Color, ColorMatcher, WheelColor};
//!
//! let matcher = ColorMatcher::with_default_palette();
//! let sample = Color::new(0.48, 0.36, 0.16);
//!
//! let result = matcher.match_color(sample).unwrap();
//! assert_eq!(result.color, WheelColor::Red);
//! ```

#![no_std]

extern crate alloc;

pub mod color;
pub mod config;
pub mod dashboard;
mod debounce;
pub mod driver;
pub mod game_data;
pub mod hardware;
pub mod matcher;
#[cfg(test)]
mod mock;
pub mod position;
pub mod report;
pub mod rotation;
pub mod telemetry;
pub mod wheel;

pub use color::{Color, WheelColor};
pub use config::{ConfigError, WheelConfig};
pub use dashboard::{RefreshDivider, ScreenCache, ScreenDashboard};
pub use driver::{DriverControls, DriverError, DriverInput};
pub use game_data::{GameData, GameDataError, GameMessageBuffer};
pub use hardware::{
    ColorSensor, Dashboard, Device, GameDataSource, HardwareError, Spinner, TextScreen,
};
pub use matcher::{ColorMatch, ColorMatcher, MatcherError};
pub use position::PositionControl;
pub use report::FailureLog;
pub use rotation::RotationControl;
pub use telemetry::Telemetry;
pub use wheel::{WheelError, WheelMode, WheelOfFortune};

/// The result of advancing an automatic spin behavior by one period.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ControlStep {
    /// The goal has not been reached; keep the wheel spinning.
    Spin,
    /// The goal has been reached; stop the wheel.
    Done,
}

impl ControlStep {
    /// Returns `true` if the behavior has reached its goal.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}
