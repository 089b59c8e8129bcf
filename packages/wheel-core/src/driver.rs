//! Driver control mapping.
//!
//! - Pressing the position button starts position control towards the color the field asked
//!   for.
//! - Pressing the rotation button starts rotation control.
//! - Releasing either button stops the wheel, as does pressing the stop button.
//! - While no automatic behavior runs, the manual axis spins the wheel by hand.

use snafu::{ResultExt, Snafu};

use crate::{
    hardware::{ColorSensor, GameDataSource, Spinner},
    wheel::{WheelError, WheelMode, WheelOfFortune},
};

/// The driver's controls as read for one loop period.
///
/// Button fields are edges: `true` only in the period the button changed state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriverInput {
    /// The stop button was just pressed.
    pub stop_pressed: bool,
    /// The position control button was just pressed.
    pub position_pressed: bool,
    /// The position control button was just released.
    pub position_released: bool,
    /// The rotation control button was just pressed.
    pub rotation_pressed: bool,
    /// The rotation control button was just released.
    pub rotation_released: bool,
    /// Manual spin axis in `-1.0..=1.0`.
    pub manual: f64,
}

/// Applies [`DriverInput`] to a wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverControls {
    deadband: f64,
}

impl DriverControls {
    /// Creates the mapping, ignoring manual axis deflections up to `deadband`.
    #[must_use]
    pub const fn new(deadband: f64) -> Self {
        Self { deadband }
    }

    /// Applies one period of input to `wheel`, reading the field's message from `field` when
    /// position control is requested.
    ///
    /// # Errors
    ///
    /// - A [`DriverError::StartPosition`] error is returned if position control was requested
    ///   but could not be started.
    /// - A [`DriverError::Wheel`] error is returned if the wheel could not be commanded.
    pub fn apply<S, M, G>(
        &self,
        wheel: &mut WheelOfFortune<S, M>,
        field: &mut G,
        input: &DriverInput,
    ) -> Result<(), DriverError>
    where
        S: ColorSensor,
        M: Spinner,
        G: GameDataSource,
    {
        if input.stop_pressed {
            wheel.stop()?;
        } else if input.position_pressed {
            let message = field
                .game_message()
                .map_err(WheelError::from)
                .context(StartPositionSnafu)?;
            wheel
                .start_position_control(message)
                .context(StartPositionSnafu)?;
        } else if input.rotation_pressed {
            wheel.start_rotation_control();
        } else if input.position_released || input.rotation_released {
            wheel.stop()?;
        } else if matches!(wheel.mode(), WheelMode::Idle | WheelMode::Manual) {
            if input.manual.abs() > self.deadband {
                wheel.set_speed(input.manual)?;
            } else if wheel.mode() == WheelMode::Manual {
                wheel.stop()?;
            }
        }

        Ok(())
    }
}

/// Errors returned by [`DriverControls::apply`].
#[derive(Debug, Snafu)]
pub enum DriverError {
    /// Position control was requested but could not be started.
    #[snafu(display("cannot start position control: {source}"))]
    StartPosition {
        /// The source of the error.
        source: WheelError,
    },

    /// The wheel could not be commanded.
    #[snafu(display("{source}"), context(false))]
    Wheel {
        /// The source of the error.
        source: WheelError,
    },
}
