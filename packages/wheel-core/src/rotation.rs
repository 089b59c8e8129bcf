//! Rotation control.
//!
//! Spins the panel a set number of times by counting the color transitions its wedges make
//! as they pass the sensor. The panel carries eight wedges (each color twice), so one full
//! rotation is [`WEDGES_PER_ROTATION`] transitions.

use log::{debug, info};

use crate::{ControlStep, color::WheelColor, debounce::StableColor};

/// Number of color transitions observed during one full rotation of the panel.
pub const WEDGES_PER_ROTATION: u32 = 8;

/// Counts color transitions until a target count is reached.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RotationControl {
    target_transitions: u32,
    transitions: u32,
    filter: StableColor,
}

impl RotationControl {
    /// Creates a rotation controller that finishes after `target_transitions` transitions.
    ///
    /// A color only counts once it has been classified `stable_samples` times in a row.
    #[must_use]
    pub const fn new(target_transitions: u32, stable_samples: u32) -> Self {
        Self {
            target_transitions,
            transitions: 0,
            filter: StableColor::new(stable_samples),
        }
    }

    /// Creates a rotation controller that finishes after roughly `rotations` full turns of the
    /// panel, rounded to the nearest wedge.
    ///
    /// Negative and non-finite rotation counts are treated as zero.
    #[must_use]
    pub fn from_rotations(rotations: f64, stable_samples: u32) -> Self {
        let transitions = if rotations.is_finite() && rotations > 0.0 {
            libm::round(rotations * f64::from(WEDGES_PER_ROTATION)) as u32
        } else {
            0
        };

        Self::new(transitions, stable_samples)
    }

    /// Advances the controller by one classified sample.
    ///
    /// The first stable color only establishes where counting starts from; every change of
    /// stable color after that counts one transition. Unknown samples never count.
    pub fn update(&mut self, sample: Option<WheelColor>) -> ControlStep {
        if self.is_done() {
            return ControlStep::Done;
        }

        let previous = self.filter.stable();
        if let Some(color) = self.filter.update(sample) {
            if let Some(previous) = previous {
                self.transitions += 1;
                debug!(
                    "rotation transition {previous} -> {color} ({}/{})",
                    self.transitions, self.target_transitions
                );
            } else {
                debug!("rotation starting on {color}");
            }
        }

        if self.is_done() {
            info!(
                "rotation control finished after {} transitions",
                self.transitions
            );
            ControlStep::Done
        } else {
            ControlStep::Spin
        }
    }

    /// Number of transitions counted so far.
    #[must_use]
    pub const fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Number of transitions needed to finish.
    #[must_use]
    pub const fn target_transitions(&self) -> u32 {
        self.target_transitions
    }

    /// Number of panel rotations counted so far.
    #[must_use]
    pub fn rotations(&self) -> f64 {
        f64::from(self.transitions) / f64::from(WEDGES_PER_ROTATION)
    }

    /// The color currently considered to be under the sensor.
    #[must_use]
    pub const fn current_color(&self) -> Option<WheelColor> {
        self.filter.stable()
    }

    /// Returns `true` once the target number of transitions has been counted.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.transitions >= self.target_transitions
    }

    /// Clears the transition count so the controller can be run again.
    pub const fn reset(&mut self) {
        self.transitions = 0;
        self.filter.reset();
    }
}
