//! [`ServoDriver`] implementation for the PCA9685 driver

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use pwm_pca9685::{Channel, Pca9685};
use embedded_hal::blocking::i2c::{Write, WriteRead};

use super::{ServoDriver, ServoError};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Counts in one PWM period. The off count must stay below this.
const MAX_PWM: u16 = 4096;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<I2C, E> ServoDriver for Pca9685<I2C>
where 
    I2C: Write<Error = E> + WriteRead<Error = E>
{
    fn set_duty_cycle(
        &mut self, 
        channel: u8, 
        duty_cycle: f64
    ) -> Result<(), ServoError> {

        // If the duty cycle is out of range return an error
        if duty_cycle < 0.0 || duty_cycle > 1.0 {
            return Err(ServoError::InvalidDutyCycle)
        }

        match self.set_channel_on_off(
            channel_from_index(channel)?,
            0,
            off_count(duty_cycle)
        ) {
            Ok(_) => Ok(()),
            Err(pwm_pca9685::Error::I2C(_)) => Err(ServoError::I2c),
            Err(_) => Err(ServoError::InvalidDutyCycle)
        }
    }
}

/// Map a channel index onto the board's channel, `C0` to `C15`.
pub fn channel_from_index(index: u8) -> Result<Channel, ServoError> {
    let channel = match index {
        0 => Channel::C0,
        1 => Channel::C1,
        2 => Channel::C2,
        3 => Channel::C3,
        4 => Channel::C4,
        5 => Channel::C5,
        6 => Channel::C6,
        7 => Channel::C7,
        8 => Channel::C8,
        9 => Channel::C9,
        10 => Channel::C10,
        11 => Channel::C11,
        12 => Channel::C12,
        13 => Channel::C13,
        14 => Channel::C14,
        15 => Channel::C15,
        _ => return Err(ServoError::InvalidChannel(index)),
    };

    Ok(channel)
}

/// Off count for a duty cycle in `[0, 1]`.
fn off_count(duty_cycle: f64) -> u16 {
    ((duty_cycle * MAX_PWM as f64) as u16).min(MAX_PWM - 1)
}
