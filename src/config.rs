//! Robot tuning.
//!
//! Smart port assignments are made in `main`: optical sensor on port 1, spinner motor on port
//! 10, field link on port 11.

use std::time::Duration;

use vexide::prelude::{Controller, Direction, Gearset};
use wheel_core::WheelConfig;

/// Baud rate of the field management system link.
pub const FIELD_LINK_BAUD_RATE: u32 = 115_200;

/// Cartridge installed in the spinner motor.
pub const SPINNER_GEARSET: Gearset = Gearset::Green;

/// Direction that turns the panel the way the wedge order in [`wheel_core::WheelColor::ALL`]
/// assumes.
pub const SPINNER_DIRECTION: Direction = Direction::Forward;

/// Brightness of the optical sensor's own LED, as a fraction of full brightness.
///
/// The reference colors were calibrated with the LED fully on.
pub const COLOR_SENSOR_LED_BRIGHTNESS: f64 = 1.0;

/// How often the driver control loop runs.
pub const LOOP_PERIOD: Duration = Controller::UPDATE_INTERVAL;

/// Number of loop periods between dashboard refreshes.
///
/// Controller screen writes are slow, so the dashboard is refreshed less often than the loop
/// runs.
pub const DASHBOARD_DIVIDER: u32 = 4;

/// Stick deflection below which the manual spin axis is ignored.
pub const MANUAL_DEADBAND: f64 = 0.05;

/// Tuning for the wheel itself.
#[must_use]
pub fn wheel_config() -> WheelConfig {
    WheelConfig::default()
        .with_rotation_speed(0.5)
        .with_position_speed(0.2)
        .with_target_rotations(4.0)
        .with_stable_samples(3)
}
