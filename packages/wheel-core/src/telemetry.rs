//! Telemetry published to the drive team.

use alloc::{format, string::String};

use crate::{color::WheelColor, wheel::WheelMode};

/// A snapshot of what the wheel is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    /// What the wheel is currently doing.
    pub mode: WheelMode,
    /// The color classified from the latest sample, if it matched anything.
    pub detected: Option<WheelColor>,
    /// Confidence of the latest classification, or zero if nothing matched.
    pub confidence: f64,
    /// Color transitions counted by rotation control.
    pub transitions: u32,
    /// Color transitions rotation control is counting towards.
    pub target_transitions: u32,
    /// The color position control is spinning towards.
    pub position_target: Option<WheelColor>,
    /// The speed the spinner was last commanded to.
    pub speed: f64,
}

impl Telemetry {
    /// Number of characters [`Telemetry::lines`] fits each line within.
    pub const LINE_WIDTH: usize = 14;

    /// Creates telemetry for an idle wheel.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            mode: WheelMode::Idle,
            detected: None,
            confidence: 0.0,
            transitions: 0,
            target_transitions: 0,
            position_target: None,
            speed: 0.0,
        }
    }

    /// Name of the detected color, or `"Unknown"`.
    #[must_use]
    pub fn detected_label(&self) -> &'static str {
        self.detected.map_or("Unknown", WheelColor::name)
    }

    /// Formats the telemetry as two short lines suitable for a small text display.
    #[must_use]
    pub fn lines(&self) -> [String; 2] {
        let color = match self.detected {
            Some(color) => format!("{color} {:.0}%", self.confidence.clamp(0.0, 1.0) * 100.0),
            None => String::from("Unknown"),
        };

        let mode = match self.mode {
            WheelMode::Idle => String::from("IDLE"),
            WheelMode::Manual => format!("MAN {:+.2}", self.speed),
            WheelMode::Rotation => format!("ROT {}/{}", self.transitions, self.target_transitions),
            WheelMode::Position => match self.position_target {
                Some(target) => format!("POS {target}"),
                None => String::from("POS"),
            },
            WheelMode::Complete => String::from("DONE"),
        };

        [truncate(color), truncate(mode)]
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::idle()
    }
}

fn truncate(mut line: String) -> String {
    if let Some((index, _)) = line.char_indices().nth(Telemetry::LINE_WIDTH) {
        line.truncate(index);
    }
    line
}
