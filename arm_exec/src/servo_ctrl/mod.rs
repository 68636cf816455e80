//! # Servo Controller Module
//!
//! This module provides a unified servo control interface which can abstract over different types
//! of servo driver boards, and maps joint angle demands onto servo duty cycles.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// [`ServoDriver`] implementation for the Adafruit PCA9685 16 channel servo driver board.
pub mod pca9685;

/// [`ServoDriver`] implementation which only logs demands.
pub mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::mech::{ActId, MechDems};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use util::maths::{clamp, lin_map};

use crate::arm_ctrl::Actuator;

pub use sim::SimServoDriver;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for accessing servo driver boards.
pub trait ServoDriver {
    /// Set the duty cycle of a channel.
    ///
    /// ## Arguments
    /// - `channel` - The channel index to set the duty cycle for
    /// - `duty_cycle` - The duty cycle to set. Must be a value between 0.0 and 1.0. Values outside
    ///   this range will be rejected.
    fn set_duty_cycle(&mut self, channel: u8, duty_cycle: f64) -> Result<(), ServoError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drives the arm's joints through a [`ServoDriver`].
pub struct ServoCtrl<D>
where
    D: ServoDriver,
{
    driver: D,

    servo_config_map: HashMap<ActId, ServoConfig>,
}

/// Calibration of one positional servo.
///
/// The angle range maps linearly onto the duty cycle range.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServoConfig {
    /// Driver channel index
    pub channel: u8,

    /// Units: degrees
    pub min_angle_deg: f64,

    /// Units: degrees
    pub max_angle_deg: f64,

    /// Duty cycle at `min_angle_deg`, between 0.0 and 1.0
    pub min_duty: f64,

    /// Duty cycle at `max_angle_deg`, between 0.0 and 1.0
    pub max_duty: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum ServoError {
    #[error("An I2C error occured")]
    I2c,

    #[error("Duty cycle must be between 0.0 and 1.0")]
    InvalidDutyCycle,

    #[error("Channel {0} does not exist on the driver")]
    InvalidChannel(u8),

    #[error("Invalid servo configuration for {0:?}: {1}")]
    InvalidConfig(ActId, String),

    #[error("No servo is configured for {0:?}")]
    NoConfig(ActId),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ServoConfig {
    fn validate(&self, act_id: ActId) -> Result<(), ServoError> {
        if !(self.min_angle_deg < self.max_angle_deg) {
            return Err(ServoError::InvalidConfig(
                act_id,
                format!(
                    "angle range [{}, {}] is empty",
                    self.min_angle_deg, self.max_angle_deg
                ),
            ));
        }

        for duty in [self.min_duty, self.max_duty].iter() {
            if *duty < 0.0 || *duty > 1.0 {
                return Err(ServoError::InvalidConfig(
                    act_id,
                    format!("duty cycle {} is outside [0, 1]", duty),
                ));
            }
        }

        Ok(())
    }

    /// Duty cycle for an angle already inside the calibrated range.
    fn duty_for(&self, angle_deg: f64) -> f64 {
        lin_map(
            (self.min_angle_deg, self.max_angle_deg),
            (self.min_duty, self.max_duty),
            angle_deg,
        )
    }
}

impl<D> ServoCtrl<D>
where
    D: ServoDriver,
{
    /// Create a new servo controller.
    ///
    /// ## Arguments
    /// - `driver` - An initialised [`ServoDriver`] board
    /// - `shoulder` - Calibration of the shoulder servo
    /// - `elbow` - Calibration of the elbow servo
    pub fn new(driver: D, shoulder: ServoConfig, elbow: ServoConfig) -> Result<Self, ServoError> {
        shoulder.validate(ActId::ArmShoulder)?;
        elbow.validate(ActId::ArmElbow)?;

        let mut servo_config_map = HashMap::new();
        servo_config_map.insert(ActId::ArmShoulder, shoulder);
        servo_config_map.insert(ActId::ArmElbow, elbow);

        Ok(Self {
            driver,
            servo_config_map,
        })
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Command one servo to an angle.
    ///
    /// Angles outside the calibrated range are limited to it.
    pub fn set_angle(&mut self, act_id: ActId, angle_deg: f64) -> Result<(), ServoError> {
        let config = self
            .servo_config_map
            .get(&act_id)
            .ok_or(ServoError::NoConfig(act_id))?;

        let limited_deg = clamp(&angle_deg, &config.min_angle_deg, &config.max_angle_deg);
        if limited_deg != angle_deg {
            warn!(
                "{:?} demand of {:.2} deg limited to {:.2} deg",
                act_id, angle_deg, limited_deg
            );
        }

        let duty = config.duty_for(limited_deg);
        let channel = config.channel;

        self.driver.set_duty_cycle(channel, duty)
    }
}

impl<D> Actuator for ServoCtrl<D>
where
    D: ServoDriver,
{
    fn actuate(&mut self, dems: &MechDems) -> Result<(), ServoError> {
        for act_id in ActId::arm_ids() {
            if let Some(angle_deg) = dems.pos_deg.get(act_id) {
                self.set_angle(*act_id, *angle_deg)?;
            }
        }

        Ok(())
    }
}
