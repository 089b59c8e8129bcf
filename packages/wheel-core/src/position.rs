//! Position control.
//!
//! Spins the panel until the robot's sensor settles on a requested color. The requested color
//! is normally derived from the field management system's game data with
//! [`GameData::sensor_target`](crate::game_data::GameData::sensor_target).

use log::info;

use crate::{ControlStep, color::WheelColor, debounce::StableColor};

/// Spins until a target color is under the sensor.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PositionControl {
    target: WheelColor,
    done: bool,
    filter: StableColor,
}

impl PositionControl {
    /// Creates a position controller that finishes once `target` has been classified
    /// `stable_samples` times in a row.
    #[must_use]
    pub const fn new(target: WheelColor, stable_samples: u32) -> Self {
        Self {
            target,
            done: false,
            filter: StableColor::new(stable_samples),
        }
    }

    /// Advances the controller by one classified sample.
    pub fn update(&mut self, sample: Option<WheelColor>) -> ControlStep {
        if self.done {
            return ControlStep::Done;
        }

        if self.filter.update(sample) == Some(self.target) {
            info!("position control reached {}", self.target);
            self.done = true;
            ControlStep::Done
        } else {
            ControlStep::Spin
        }
    }

    /// The color the controller is spinning towards.
    #[must_use]
    pub const fn target(&self) -> WheelColor {
        self.target
    }

    /// The color currently considered to be under the sensor.
    #[must_use]
    pub const fn current_color(&self) -> Option<WheelColor> {
        self.filter.stable()
    }

    /// Returns `true` once the target color has been reached.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Forgets any progress so the controller can be run again.
    pub const fn reset(&mut self) {
        self.done = false;
        self.filter.reset();
    }
}
