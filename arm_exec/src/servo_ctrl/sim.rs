//! [`ServoDriver`] implementation for running without hardware

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use std::collections::HashMap;

use super::{ServoDriver, ServoError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated driver board which remembers the last duty cycle of each channel.
#[derive(Debug, Default)]
pub struct SimServoDriver {
    duty_cycles: HashMap<u8, f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimServoDriver {
    /// Last duty cycle set on `channel`, if any.
    pub fn duty_cycle(&self, channel: u8) -> Option<f64> {
        self.duty_cycles.get(&channel).copied()
    }
}

impl ServoDriver for SimServoDriver {
    fn set_duty_cycle(&mut self, channel: u8, duty_cycle: f64) -> Result<(), ServoError> {
        if duty_cycle < 0.0 || duty_cycle > 1.0 {
            return Err(ServoError::InvalidDutyCycle);
        }

        trace!("Sim servo channel {} duty {:.4}", channel, duty_cycle);
        self.duty_cycles.insert(channel, duty_cycle);

        Ok(())
    }
}
