//! Color wheel spinner.
//!
//! Reads the control panel's colors with an optical sensor and turns it with a single motor,
//! either a set number of rotations or until the color the field asked for is in position.

mod config;
mod devices;
mod logger;
mod robot;

use log::{LevelFilter, error, info};
use vexide::prelude::*;
use wheel_core::WheelOfFortune;

use crate::{
    devices::{MotorSpinner, OpticalColorSensor, SerialFieldLink},
    robot::Robot,
};

#[vexide::main]
async fn main(peripherals: Peripherals) {
    if let Err(error) = logger::init(LevelFilter::Info) {
        println!("failed to install logger: {error}");
    }

    let sensor = OpticalColorSensor::new(peripherals.port_1);
    let spinner = MotorSpinner::new(peripherals.port_10);
    let field = SerialFieldLink::open(peripherals.port_11).await;

    let wheel = match WheelOfFortune::new(sensor, spinner, config::wheel_config()) {
        Ok(wheel) => wheel,
        Err(error) => {
            error!("wheel configuration rejected: {error}");
            return;
        }
    };
    info!("color wheel ready");

    Robot::new(peripherals.primary_controller, wheel, field)
        .compete()
        .await;
}
