//! # Arm Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::{
    feedback::{BuzzerParams, FeedbackKind},
    servo_ctrl::ServoConfig,
    trace::TraceKind,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct ArmExecParams {
    /// Minimum log level, one of `info`, `debug` or `trace`
    pub log_level: String,

    // ---- INPUT ----
    /// Where command bytes are read from
    pub input: InputKind,

    /// Baud rate of the UART input channel
    pub uart_baud_rate: u32,

    // ---- ACTUATION ----
    /// Which servo driver board to use
    pub driver: DriverKind,

    /// I2C address of the PCA9685 board
    pub pca9685_address: u8,

    /// PCA9685 prescale value, sets the PWM frequency
    pub pca9685_prescale: u8,

    /// Calibration of the shoulder servo
    pub shoulder_servo: ServoConfig,

    /// Calibration of the elbow servo
    pub elbow_servo: ServoConfig,

    // ---- DIAGNOSTICS ----
    /// How move outcomes are signalled
    pub feedback: FeedbackKind,

    #[serde(default)]
    pub buzzer: BuzzerParams,

    /// How move attempts are traced
    pub trace: TraceKind,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Stdin,
    Uart,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    Pca9685,
    Sim,
}
