//! The color wheel manipulator.
//!
//! [`WheelOfFortune`] ties a [`ColorSensor`], a [`Spinner`], and a [`ColorMatcher`] together.
//! It is driven from the robot's periodic loop: pick a behavior with one of the `start_*`
//! methods, then call [`WheelOfFortune::periodic`] once per period until the mode becomes
//! [`WheelMode::Complete`].

use log::{info, warn};
use snafu::{ResultExt, Snafu};

use crate::{
    ControlStep,
    color::WheelColor,
    config::{ConfigError, WheelConfig},
    game_data::{GameData, GameDataError},
    hardware::{ColorSensor, HardwareError, Spinner},
    matcher::{ColorMatch, ColorMatcher, MatcherError},
    position::PositionControl,
    rotation::RotationControl,
    telemetry::Telemetry,
};

/// What the wheel is currently doing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WheelMode {
    /// The motor is held stopped.
    Idle,
    /// The motor runs at a speed chosen by the operator.
    Manual,
    /// Rotation control is counting color transitions.
    Rotation,
    /// Position control is seeking a color.
    Position,
    /// An automatic behavior finished and the motor is stopped.
    Complete,
}

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Idle,
    Manual(f64),
    Rotation(RotationControl),
    Position(PositionControl),
    Complete,
}

/// The color wheel manipulator.
///
/// ```
/// use wheel_core::{Color, ColorSensor, HardwareError, Spinner, WheelConfig, WheelMode, WheelOfFortune};
///
/// struct Fixed(Color);
/// impl ColorSensor for Fixed {
///     fn read_color(&mut self) -> Result<Color, HardwareError> {
///         Ok(self.0)
///     }
/// }
///
/// struct Idle;
/// impl Spinner for Idle {
///     fn set_speed(&mut self, _speed: f64) -> Result<(), HardwareError> {
///         Ok(())
///     }
/// }
///
/// let sensor = Fixed(Color::new(0.143, 0.427, 0.429));
/// let mut wheel = WheelOfFortune::new(sensor, Idle, WheelConfig::default()).unwrap();
///
/// // The field asks for red, which the robot's sensor sees as blue.
/// wheel.start_position_control("R").unwrap();
/// while wheel.mode() != WheelMode::Complete {
///     wheel.periodic().unwrap();
/// }
/// ```
#[derive(Debug)]
pub struct WheelOfFortune<S, M> {
    sensor: S,
    spinner: M,
    matcher: ColorMatcher,
    config: WheelConfig,
    behavior: Behavior,
    telemetry: Telemetry,
}

impl<S: ColorSensor, M: Spinner> WheelOfFortune<S, M> {
    /// Creates a new idle manipulator using the default color palette.
    ///
    /// # Errors
    ///
    /// - A [`WheelError::Config`] error is returned if `config` fails
    ///   [`WheelConfig::validate`].
    pub fn new(sensor: S, spinner: M, config: WheelConfig) -> Result<Self, WheelError> {
        Self::with_matcher(sensor, spinner, ColorMatcher::with_default_palette(), config)
    }

    /// Creates a new idle manipulator with a custom color matcher.
    ///
    /// The matcher's confidence threshold is replaced by the one in `config`.
    ///
    /// # Errors
    ///
    /// - A [`WheelError::Config`] error is returned if `config` fails
    ///   [`WheelConfig::validate`].
    pub fn with_matcher(
        sensor: S,
        spinner: M,
        mut matcher: ColorMatcher,
        config: WheelConfig,
    ) -> Result<Self, WheelError> {
        config.validate()?;
        matcher.set_confidence_threshold(config.confidence)?;

        Ok(Self {
            sensor,
            spinner,
            matcher,
            config,
            behavior: Behavior::Idle,
            telemetry: Telemetry::idle(),
        })
    }

    /// Samples the sensor and classifies the result.
    ///
    /// `Ok(None)` means the sample did not confidently match any panel color.
    ///
    /// # Errors
    ///
    /// - A [`WheelError::Hardware`] error is returned if the sensor could not be read.
    pub fn detect_color(&mut self) -> Result<Option<ColorMatch>, WheelError> {
        let sample = self.sensor.read_color()?;
        Ok(self.matcher.match_color(sample))
    }

    /// Starts rotation control from a fresh count.
    pub fn start_rotation_control(&mut self) {
        let control =
            RotationControl::from_rotations(self.config.target_rotations, self.config.stable_samples);
        info!(
            "starting rotation control for {} transitions",
            control.target_transitions()
        );
        self.behavior = Behavior::Rotation(control);
        self.sync_mode();
    }

    /// Starts position control towards the color requested by a field management system
    /// game-specific message. Returns the color the robot's sensor will seek.
    ///
    /// # Errors
    ///
    /// - A [`WheelError::NoGameData`] error is returned if the message is empty.
    /// - A [`WheelError::GameData`] error is returned if the message names an unknown color.
    pub fn start_position_control(&mut self, message: &str) -> Result<WheelColor, WheelError> {
        let field_target = GameData::parse(message)
            .context(GameDataSnafu)?
            .ok_or(WheelError::NoGameData)?;

        Ok(self.start_position_control_for(field_target))
    }

    /// Starts position control so that the field's sensor ends up on `field_target`. Returns
    /// the color the robot's sensor will seek.
    pub fn start_position_control_for(&mut self, field_target: WheelColor) -> WheelColor {
        let sensor_target = GameData::sensor_target(field_target, self.config.sensor_offset_wedges);
        info!("starting position control: field wants {field_target}, seeking {sensor_target}");

        self.behavior = Behavior::Position(PositionControl::new(
            sensor_target,
            self.config.stable_samples,
        ));
        self.sync_mode();
        sensor_target
    }

    /// Drives the spinner open loop at `speed`, clamped to `-1.0..=1.0`.
    ///
    /// Any automatic behavior in progress is abandoned.
    ///
    /// # Errors
    ///
    /// - A [`WheelError::Hardware`] error is returned if the motor could not be commanded.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), WheelError> {
        let speed = if speed.is_finite() {
            speed.clamp(-1.0, 1.0)
        } else {
            0.0
        };

        self.behavior = Behavior::Manual(speed);
        self.sync_mode();
        self.command(speed)
    }

    /// Stops the spinner and abandons any behavior in progress.
    ///
    /// # Errors
    ///
    /// - A [`WheelError::Hardware`] error is returned if the motor could not be commanded.
    pub fn stop(&mut self) -> Result<(), WheelError> {
        if !matches!(self.behavior, Behavior::Idle) {
            info!("wheel stopped");
        }
        self.behavior = Behavior::Idle;
        self.sync_mode();
        self.command(0.0)
    }

    /// Runs one period: samples and classifies a color, advances the active behavior, and
    /// commands the spinner accordingly.
    ///
    /// # Errors
    ///
    /// - A [`WheelError::Hardware`] error is returned if the sensor could not be read or the
    ///   motor could not be commanded. The motor is asked to stop before a sensor error is
    ///   returned from an automatic behavior.
    pub fn periodic(&mut self) -> Result<Telemetry, WheelError> {
        let detection = match self.detect_color() {
            Ok(detection) => detection,
            Err(error) => {
                self.telemetry.detected = None;
                self.telemetry.confidence = 0.0;
                if matches!(self.behavior, Behavior::Rotation(_) | Behavior::Position(_)) {
                    warn!("color sensor failed during automatic control: {error}");
                    self.command(0.0)?;
                }
                return Err(error);
            }
        };

        let sample = detection.map(|result| result.color);
        self.telemetry.detected = sample;
        self.telemetry.confidence = detection.map_or(0.0, |result| result.confidence);

        let step = match &mut self.behavior {
            Behavior::Idle | Behavior::Manual(_) | Behavior::Complete => None,
            Behavior::Rotation(control) => {
                let step = control.update(sample);
                self.telemetry.transitions = control.transitions();
                Some((step, self.config.rotation_speed))
            }
            Behavior::Position(control) => {
                Some((control.update(sample), self.config.position_speed))
            }
        };

        let speed = match (step, self.behavior) {
            (Some((ControlStep::Spin, speed)), _) | (None, Behavior::Manual(speed)) => speed,
            (Some((ControlStep::Done, _)), _) => {
                self.behavior = Behavior::Complete;
                0.0
            }
            (None, _) => 0.0,
        };

        self.sync_mode();
        self.command(speed)?;
        Ok(self.telemetry)
    }

    /// What the wheel is currently doing.
    #[must_use]
    pub const fn mode(&self) -> WheelMode {
        self.telemetry.mode
    }

    /// The most recent telemetry.
    #[must_use]
    pub const fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// The configuration the wheel was created with.
    #[must_use]
    pub const fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// The color matcher, for recalibrating reference colors.
    pub const fn matcher_mut(&mut self) -> &mut ColorMatcher {
        &mut self.matcher
    }

    /// Consumes the wheel, returning its sensor and spinner.
    pub fn into_parts(self) -> (S, M) {
        (self.sensor, self.spinner)
    }

    fn command(&mut self, speed: f64) -> Result<(), WheelError> {
        if speed == 0.0 {
            self.spinner.stop()?;
        } else {
            self.spinner.set_speed(speed)?;
        }
        self.telemetry.speed = speed;
        Ok(())
    }

    fn sync_mode(&mut self) {
        let telemetry = &mut self.telemetry;
        let previous = telemetry.mode;

        telemetry.mode = match self.behavior {
            Behavior::Idle => WheelMode::Idle,
            Behavior::Manual(_) => WheelMode::Manual,
            Behavior::Rotation(control) => {
                telemetry.transitions = control.transitions();
                telemetry.target_transitions = control.target_transitions();
                telemetry.position_target = None;
                WheelMode::Rotation
            }
            Behavior::Position(control) => {
                telemetry.position_target = Some(control.target());
                WheelMode::Position
            }
            Behavior::Complete => WheelMode::Complete,
        };

        if telemetry.mode != previous && telemetry.mode == WheelMode::Complete {
            info!("wheel behavior complete");
        }
    }
}

/// Errors that can occur while operating the wheel.
#[derive(Debug, Snafu)]
pub enum WheelError {
    /// A device failed.
    #[snafu(display("{source}"), context(false))]
    Hardware {
        /// The source of the error.
        source: HardwareError,
    },

    /// The configuration was rejected.
    #[snafu(display("invalid wheel configuration: {source}"), context(false))]
    Config {
        /// The source of the error.
        source: ConfigError,
    },

    /// The color matcher rejected part of the configuration.
    #[snafu(display("{source}"), context(false))]
    Matcher {
        /// The source of the error.
        source: MatcherError,
    },

    /// The field management system has not sent a target color yet.
    #[snafu(display("no game data has been received"))]
    NoGameData,

    /// The field management system sent something that is not a panel color.
    #[snafu(display("invalid game data: {source}"))]
    GameData {
        /// The source of the error.
        source: GameDataError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hardware::{Device, HardwareError},
        mock::{PanelSensor, RecordingSpinner},
    };

    fn wheel(
        sensor: PanelSensor,
        config: WheelConfig,
    ) -> (WheelOfFortune<PanelSensor, RecordingSpinner>, RecordingSpinner) {
        let spinner = RecordingSpinner::default();
        let wheel = WheelOfFortune::new(sensor, spinner.clone(), config).unwrap();
        (wheel, spinner)
    }

    fn run_to_completion<S: ColorSensor, M: Spinner>(wheel: &mut WheelOfFortune<S, M>) -> usize {
        let mut periods = 0;
        while wheel.mode() != WheelMode::Complete {
            wheel.periodic().unwrap();
            periods += 1;
            assert!(periods < 10_000, "behavior never completed");
        }
        periods
    }

    #[test]
    fn rejects_invalid_config() {
        let spinner = RecordingSpinner::default();
        let result = WheelOfFortune::new(
            PanelSensor::new(WheelColor::Red, 1),
            spinner,
            WheelConfig::default().with_stable_samples(0),
        );

        assert!(matches!(result, Err(WheelError::Config { .. })));
    }

    #[test]
    fn detects_the_color_under_the_sensor() {
        let (mut wheel, _) = wheel(
            PanelSensor::new(WheelColor::Green, 1),
            WheelConfig::default(),
        );

        let result = wheel.detect_color().unwrap().unwrap();
        assert_eq!(result.color, WheelColor::Green);
    }

    #[test]
    fn idle_wheel_holds_the_motor() {
        let (mut wheel, spinner) = wheel(
            PanelSensor::new(WheelColor::Green, 1),
            WheelConfig::default(),
        );

        let telemetry = wheel.periodic().unwrap();
        assert_eq!(telemetry.mode, WheelMode::Idle);
        assert_eq!(telemetry.detected, Some(WheelColor::Green));
        assert_eq!(spinner.last(), Some(0.0));
    }

    #[test]
    fn rotation_control_spins_then_stops() {
        let config = WheelConfig::default()
            .with_target_rotations(1.0)
            .with_rotation_speed(0.4);
        let (mut wheel, spinner) = wheel(PanelSensor::new(WheelColor::Blue, 4), config);

        wheel.start_rotation_control();
        assert_eq!(wheel.mode(), WheelMode::Rotation);

        let telemetry = wheel.periodic().unwrap();
        assert_eq!(telemetry.target_transitions, 8);
        assert_eq!(spinner.last(), Some(0.4));

        // The eighth transition is confirmed on the third sample of the eighth wedge after the
        // starting one, and the first period has already run.
        let periods = run_to_completion(&mut wheel);
        assert_eq!(periods, 8 * 4 + 2);
        assert_eq!(wheel.telemetry().transitions, 8);
        assert_eq!(spinner.last(), Some(0.0));

        // Completed wheels stay stopped.
        wheel.periodic().unwrap();
        assert_eq!(wheel.mode(), WheelMode::Complete);
        assert_eq!(spinner.last(), Some(0.0));
    }

    #[test]
    fn position_control_seeks_the_offset_color() {
        let (mut wheel, spinner) = wheel(
            PanelSensor::new(WheelColor::Red, 4),
            WheelConfig::default().with_position_speed(-0.2),
        );

        // The field wants green, so the robot's sensor has to see yellow.
        assert_eq!(wheel.start_position_control("G").unwrap(), WheelColor::Yellow);
        assert_eq!(wheel.telemetry().position_target, Some(WheelColor::Yellow));

        wheel.periodic().unwrap();
        assert_eq!(spinner.last(), Some(-0.2));

        run_to_completion(&mut wheel);
        assert_eq!(wheel.telemetry().detected, Some(WheelColor::Yellow));
        assert_eq!(spinner.last(), Some(0.0));
    }

    #[test]
    fn position_control_needs_game_data() {
        let (mut wheel, _) = wheel(
            PanelSensor::new(WheelColor::Red, 1),
            WheelConfig::default(),
        );

        assert!(matches!(
            wheel.start_position_control(""),
            Err(WheelError::NoGameData)
        ));
        assert!(matches!(
            wheel.start_position_control("Z"),
            Err(WheelError::GameData {
                source: GameDataError::UnknownColor { code: 'Z' }
            })
        ));
        assert_eq!(wheel.mode(), WheelMode::Idle);
    }

    #[test]
    fn any_sensor_offset_is_accepted() {
        let (mut wheel, _) = wheel(
            PanelSensor::new(WheelColor::Red, 1),
            WheelConfig::default().with_sensor_offset_wedges(usize::MAX),
        );

        assert_eq!(wheel.start_position_control("Y").unwrap(), WheelColor::Blue);
        assert_eq!(wheel.mode(), WheelMode::Position);
    }

    #[test]
    fn manual_speed_is_clamped_and_held() {
        let (mut wheel, spinner) = wheel(
            PanelSensor::new(WheelColor::Red, 1),
            WheelConfig::default(),
        );

        wheel.set_speed(3.0).unwrap();
        assert_eq!(spinner.last(), Some(1.0));
        assert_eq!(wheel.mode(), WheelMode::Manual);

        let telemetry = wheel.periodic().unwrap();
        assert_eq!(telemetry.speed, 1.0);

        wheel.set_speed(f64::NAN).unwrap();
        assert_eq!(spinner.last(), Some(0.0));
    }

    #[test]
    fn stop_abandons_automatic_control() {
        let (mut wheel, spinner) = wheel(
            PanelSensor::new(WheelColor::Red, 1),
            WheelConfig::default(),
        );

        wheel.start_rotation_control();
        wheel.periodic().unwrap();
        wheel.stop().unwrap();

        assert_eq!(wheel.mode(), WheelMode::Idle);
        assert_eq!(spinner.last(), Some(0.0));
    }

    #[test]
    fn sensor_failure_stops_automatic_control() {
        let (mut wheel, spinner) = wheel(
            PanelSensor::new(WheelColor::Red, 1),
            WheelConfig::default(),
        );

        wheel.start_rotation_control();
        wheel.periodic().unwrap();
        assert_eq!(spinner.last(), Some(0.1));

        let (mut sensor, spinner_handle) = wheel.into_parts();
        sensor.fail = true;
        let mut wheel = WheelOfFortune::new(sensor, spinner_handle, WheelConfig::default()).unwrap();
        wheel.start_rotation_control();

        assert!(matches!(
            wheel.periodic(),
            Err(WheelError::Hardware {
                source: HardwareError::Disconnected {
                    device: Device::ColorSensor
                }
            })
        ));
        assert_eq!(spinner.last(), Some(0.0));
        assert_eq!(wheel.telemetry().detected, None);
    }
}
