//! In-memory devices shared by the unit tests.

use alloc::{rc::Rc, string::String, vec::Vec};
use core::cell::RefCell;

use crate::{
    color::{Color, WheelColor},
    hardware::{ColorSensor, Device, GameDataSource, HardwareError, Spinner, TextScreen},
};

/// Replays the wedges of a panel turning under the sensor, advancing one wedge every
/// `samples_per_wedge` reads.
pub(crate) struct PanelSensor {
    start: usize,
    samples_per_wedge: usize,
    reads: usize,
    pub(crate) fail: bool,
}

impl PanelSensor {
    pub(crate) fn new(start: WheelColor, samples_per_wedge: usize) -> Self {
        Self {
            start: start.index(),
            samples_per_wedge,
            reads: 0,
            fail: false,
        }
    }
}

impl ColorSensor for PanelSensor {
    fn read_color(&mut self) -> Result<Color, HardwareError> {
        if self.fail {
            return Err(HardwareError::Disconnected {
                device: Device::ColorSensor,
            });
        }

        let wedge = self.start + self.reads / self.samples_per_wedge;
        self.reads += 1;
        Ok(WheelColor::ALL[wedge % WheelColor::ALL.len()].reference())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingSpinner {
    commands: Rc<RefCell<Vec<f64>>>,
}

impl RecordingSpinner {
    pub(crate) fn last(&self) -> Option<f64> {
        self.commands.borrow().last().copied()
    }
}

impl Spinner for RecordingSpinner {
    fn set_speed(&mut self, speed: f64) -> Result<(), HardwareError> {
        self.commands.borrow_mut().push(speed);
        Ok(())
    }
}

/// A field link that always reports the same message.
pub(crate) struct FixedMessage {
    pub(crate) message: String,
    pub(crate) fail: bool,
}

impl FixedMessage {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: String::from(message),
            fail: false,
        }
    }
}

impl GameDataSource for FixedMessage {
    fn game_message(&mut self) -> Result<&str, HardwareError> {
        if self.fail {
            return Err(HardwareError::Unavailable {
                device: Device::FieldLink,
            });
        }

        Ok(&self.message)
    }
}

/// Records every line written to it.
#[derive(Default)]
pub(crate) struct RecordingScreen {
    pub(crate) writes: Vec<(usize, String)>,
    pub(crate) fail: bool,
}

impl TextScreen for RecordingScreen {
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), HardwareError> {
        if self.fail {
            return Err(HardwareError::Disconnected {
                device: Device::Dashboard,
            });
        }

        self.writes.push((line, String::from(text)));
        Ok(())
    }
}
