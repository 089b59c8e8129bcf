//! Tuning for the color wheel manipulator.

use snafu::{Snafu, ensure};

use crate::{game_data::DEFAULT_SENSOR_OFFSET_WEDGES, matcher::ColorMatcher};

/// Tunable parameters of the [`WheelOfFortune`](crate::wheel::WheelOfFortune).
///
/// ```
/// use wheel_core::WheelConfig;
///
/// let config = WheelConfig::default()
///     .with_rotation_speed(0.25)
///     .with_target_rotations(3.5);
///
/// assert!(config.validate().is_ok());
/// assert!(config.with_stable_samples(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelConfig {
    /// Motor speed during rotation control, as a fraction of full power.
    pub rotation_speed: f64,
    /// Motor speed during position control, as a fraction of full power.
    pub position_speed: f64,
    /// Full panel rotations rotation control should perform.
    pub target_rotations: f64,
    /// Consecutive identical classifications needed before a color is trusted.
    pub stable_samples: u32,
    /// Minimum match confidence for a sample to be classified at all.
    pub confidence: f64,
    /// Wedges between the field's sensor and the robot's sensor.
    pub sensor_offset_wedges: usize,
}

impl WheelConfig {
    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// - A [`ConfigError::InvalidSpeed`] error is returned if a spin speed is zero, not finite,
    ///   or outside of `-1.0..=1.0`.
    /// - A [`ConfigError::InvalidRotations`] error is returned if `target_rotations` is negative
    ///   or not finite.
    /// - A [`ConfigError::NoStableSamples`] error is returned if `stable_samples` is zero.
    /// - A [`ConfigError::InvalidConfidence`] error is returned if `confidence` is outside of
    ///   `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, speed) in [
            ("rotation", self.rotation_speed),
            ("position", self.position_speed),
        ] {
            ensure!(
                speed != 0.0 && (-1.0..=1.0).contains(&speed),
                InvalidSpeedSnafu { name, speed }
            );
        }

        ensure!(
            self.target_rotations.is_finite() && self.target_rotations >= 0.0,
            InvalidRotationsSnafu {
                rotations: self.target_rotations
            }
        );
        ensure!(self.stable_samples > 0, NoStableSamplesSnafu);
        ensure!(
            (0.0..=1.0).contains(&self.confidence),
            InvalidConfidenceSnafu {
                confidence: self.confidence
            }
        );

        Ok(())
    }

    /// Sets the rotation control speed.
    #[must_use]
    pub const fn with_rotation_speed(mut self, speed: f64) -> Self {
        self.rotation_speed = speed;
        self
    }

    /// Sets the position control speed.
    #[must_use]
    pub const fn with_position_speed(mut self, speed: f64) -> Self {
        self.position_speed = speed;
        self
    }

    /// Sets the number of rotations rotation control performs.
    #[must_use]
    pub const fn with_target_rotations(mut self, rotations: f64) -> Self {
        self.target_rotations = rotations;
        self
    }

    /// Sets how many consecutive classifications make a color trusted.
    #[must_use]
    pub const fn with_stable_samples(mut self, samples: u32) -> Self {
        self.stable_samples = samples;
        self
    }

    /// Sets the minimum match confidence.
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets the wedge offset between the field's sensor and the robot's sensor.
    #[must_use]
    pub const fn with_sensor_offset_wedges(mut self, wedges: usize) -> Self {
        self.sensor_offset_wedges = wedges;
        self
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 0.1,
            position_speed: 0.1,
            target_rotations: 4.0,
            stable_samples: 3,
            confidence: ColorMatcher::DEFAULT_CONFIDENCE,
            sensor_offset_wedges: DEFAULT_SENSOR_OFFSET_WEDGES,
        }
    }
}

/// Errors found when validating a [`WheelConfig`].
#[derive(Debug, Snafu, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A spin speed was zero or out of range.
    #[snafu(display("{name} speed {speed} must be non-zero and within -1.0..=1.0"))]
    InvalidSpeed {
        /// Which speed was rejected.
        name: &'static str,
        /// The rejected speed.
        speed: f64,
    },

    /// The rotation target was negative or not finite.
    #[snafu(display("target rotations {rotations} must be a finite, non-negative number"))]
    InvalidRotations {
        /// The rejected rotation count.
        rotations: f64,
    },

    /// Colors must be seen at least once to be trusted.
    #[snafu(display("stable sample count must be at least 1"))]
    NoStableSamples,

    /// The confidence threshold was out of range.
    #[snafu(display("confidence {confidence} is outside of 0.0..=1.0"))]
    InvalidConfidence {
        /// The rejected confidence.
        confidence: f64,
    },
}
