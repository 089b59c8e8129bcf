//! V5 implementations of the wheel's device traits.

use log::{debug, warn};
use vexide::{
    controller::ControllerError,
    prelude::{Controller, Motor, OpticalSensor, SerialPort},
    smart::{PortError, SmartPort, motor::BrakeMode},
};
use wheel_core::{
    Color, ColorSensor, Device, GameDataSource, GameMessageBuffer, HardwareError, Spinner,
    Telemetry, TextScreen,
};

use crate::config;

const fn port_error(device: Device, error: &PortError) -> HardwareError {
    match error {
        PortError::Disconnected { .. } => HardwareError::Disconnected { device },
        PortError::IncorrectDevice { .. } => HardwareError::IncorrectDevice { device },
    }
}

/// The optical sensor facing the panel.
pub struct OpticalColorSensor {
    sensor: OpticalSensor,
}

impl OpticalColorSensor {
    /// Creates the sensor and switches on its LED.
    pub fn new(port: SmartPort) -> Self {
        let mut sensor = OpticalSensor::new(port);
        if let Err(error) = sensor.set_led_brightness(config::COLOR_SENSOR_LED_BRIGHTNESS) {
            warn!("could not switch on the color sensor LED: {error}");
        }

        Self { sensor }
    }
}

impl ColorSensor for OpticalColorSensor {
    fn read_color(&mut self) -> Result<Color, HardwareError> {
        let rgb = self
            .sensor
            .color()
            .map_err(|error| port_error(Device::ColorSensor, &error))?;

        Ok(Color::new(rgb.red, rgb.green, rgb.blue))
    }
}

/// The motor turning the panel, driven by voltage.
pub struct MotorSpinner {
    motor: Motor,
}

impl MotorSpinner {
    /// Creates the spinner motor.
    pub fn new(port: SmartPort) -> Self {
        Self {
            motor: Motor::new(port, config::SPINNER_GEARSET, config::SPINNER_DIRECTION),
        }
    }
}

impl Spinner for MotorSpinner {
    fn set_speed(&mut self, speed: f64) -> Result<(), HardwareError> {
        self.motor
            .set_voltage(speed.clamp(-1.0, 1.0) * Motor::V5_MAX_VOLTAGE)
            .map_err(|error| port_error(Device::Motor, &error))
    }

    fn stop(&mut self) -> Result<(), HardwareError> {
        self.motor
            .brake(BrakeMode::Brake)
            .map_err(|error| port_error(Device::Motor, &error))
    }
}

/// The serial link carrying game-specific messages from the field management system.
///
/// Messages are newline-terminated ASCII.
pub struct SerialFieldLink {
    serial: SerialPort,
    buffer: GameMessageBuffer,
}

impl SerialFieldLink {
    /// Opens the link at [`config::FIELD_LINK_BAUD_RATE`].
    pub async fn open(port: SmartPort) -> Self {
        Self {
            serial: SerialPort::open(port, config::FIELD_LINK_BAUD_RATE).await,
            buffer: GameMessageBuffer::new(),
        }
    }

    /// Drains every byte waiting on the link.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::Unavailable`] if the serial device cannot be read.
    pub fn poll(&mut self) -> Result<(), HardwareError> {
        let waiting = self
            .serial
            .unread_bytes()
            .map_err(|_| HardwareError::Unavailable {
                device: Device::FieldLink,
            })?;

        for _ in 0..waiting {
            let Some(byte) = self.serial.read_byte() else {
                break;
            };

            if self.buffer.push(byte) {
                debug!("game data received: {:?}", self.buffer.latest());
            }
        }

        Ok(())
    }
}

impl GameDataSource for SerialFieldLink {
    fn game_message(&mut self) -> Result<&str, HardwareError> {
        self.poll()?;
        Ok(self.buffer.latest())
    }
}

/// The controller screen, addressed from line zero.
pub struct ControllerText<'a>(pub &'a mut Controller);

// Telemetry lines are drawn from the first column and must fit the screen.
const _: () = assert!(Telemetry::LINE_WIDTH < Controller::MAX_COLUMNS as usize);

impl TextScreen for ControllerText<'_> {
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), HardwareError> {
        // Controller screen lines and columns are numbered from one.
        self.0
            .try_set_text(text, line as u8 + 1, 1)
            .map_err(|error| match error {
                ControllerError::Offline => HardwareError::Disconnected {
                    device: Device::Dashboard,
                },
                _ => HardwareError::Unavailable {
                    device: Device::Dashboard,
                },
            })
    }
}
