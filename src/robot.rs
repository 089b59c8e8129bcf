//! Competition lifecycle for the color wheel manipulator.
//!
//! Driver controls:
//!
//! - Hold **A** to run position control towards the color the field asked for.
//! - Hold **B** to run rotation control.
//! - Press **X** to stop whatever the wheel is doing.
//! - Otherwise the right stick's X axis spins the wheel by hand.
//!
//! Releasing A or B stops the wheel.

use log::{debug, info};
use vexide::{
    controller::ControllerState,
    prelude::{Compete, Controller, sleep},
};
use wheel_core::{
    Dashboard, DriverControls, DriverError, DriverInput, FailureLog, RefreshDivider, ScreenCache,
    WheelColor, WheelMode, WheelOfFortune,
};

use crate::{
    config,
    devices::{ControllerText, MotorSpinner, OpticalColorSensor, SerialFieldLink},
};

/// The wheel as wired on this robot.
pub type Wheel = WheelOfFortune<OpticalColorSensor, MotorSpinner>;

fn driver_input(state: &ControllerState) -> DriverInput {
    DriverInput {
        stop_pressed: state.button_x.is_now_pressed(),
        position_pressed: state.button_a.is_now_pressed(),
        position_released: state.button_a.is_now_released(),
        rotation_pressed: state.button_b.is_now_pressed(),
        rotation_released: state.button_b.is_now_released(),
        manual: state.right_stick.x(),
    }
}

/// The robot program.
pub struct Robot {
    controller: Controller,
    wheel: Wheel,
    field: SerialFieldLink,
    controls: DriverControls,
    screen: ScreenCache,
    refresh: RefreshDivider,
    last_detected: Option<WheelColor>,
    failures: FailureLog,
}

impl Robot {
    /// Creates the robot from its devices.
    pub const fn new(controller: Controller, wheel: Wheel, field: SerialFieldLink) -> Self {
        Self {
            controller,
            wheel,
            field,
            controls: DriverControls::new(config::MANUAL_DEADBAND),
            screen: ScreenCache::new(),
            refresh: RefreshDivider::new(config::DASHBOARD_DIVIDER),
            last_detected: None,
            failures: FailureLog::new(),
        }
    }

    fn report<E: std::fmt::Display>(&mut self, context: &str, error: E) {
        self.failures.report(context, error);
    }

    fn stop_wheel(&mut self) {
        if let Err(error) = self.wheel.stop() {
            self.report("failed to stop the wheel", error);
        }
    }

    /// Runs one period of driver control.
    fn driver_tick(&mut self) {
        self.failures.begin_period();

        if let Err(error) = self.field.poll() {
            self.report("field link", error);
        }

        match self.controller.state() {
            Ok(state) => {
                let input = driver_input(&state);
                match self.controls.apply(&mut self.wheel, &mut self.field, &input) {
                    Ok(()) => {}
                    Err(error @ DriverError::StartPosition { .. }) => {
                        self.report("driver", error);
                        self.controller.try_rumble("-").ok();
                    }
                    Err(error) => self.report("driver", error),
                }
            }
            Err(error) => {
                if self.wheel.mode() != WheelMode::Idle {
                    self.stop_wheel();
                }
                self.report("controller", error);
            }
        }

        match self.wheel.periodic() {
            Ok(telemetry) if telemetry.detected != self.last_detected => {
                debug!("detected color: {}", telemetry.detected_label());
                self.last_detected = telemetry.detected;
            }
            Ok(_) => {}
            Err(error) => self.report("wheel", error),
        }

        if self.refresh.tick() {
            let telemetry = *self.wheel.telemetry();
            let mut text = ControllerText(&mut self.controller);
            if let Err(error) = self.screen.dashboard(&mut text).publish(&telemetry) {
                self.report("dashboard", error);
            }
        }

        self.failures.end_period();
    }
}

impl Compete for Robot {
    async fn connected(&mut self) {
        info!("competition control connected");
    }

    async fn disconnected(&mut self) {
        info!("competition control disconnected");
    }

    async fn disabled(&mut self) {
        self.stop_wheel();
    }

    async fn autonomous(&mut self) {
        // The wheel is only operated by the drive team.
        self.stop_wheel();
    }

    async fn driver(&mut self) {
        info!("driver control started");
        self.screen.invalidate();
        self.failures.clear();

        loop {
            self.driver_tick();
            sleep(config::LOOP_PERIOD).await;
        }
    }
}
