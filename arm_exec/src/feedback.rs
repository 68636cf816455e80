//! # Move feedback
//!
//! Signals the outcome of every move attempt to the operator. Feedback is
//! purely observational and never influences control.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::info;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Binary success/failure signal emitted once per move attempt.
pub trait Feedback {
    fn success(&mut self);

    fn failure(&mut self);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Feedback disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

/// Feedback written to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

/// Tone settings for the buzzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuzzerParams {
    /// Units: hertz
    pub success_freq_hz: f64,

    /// Units: hertz
    pub failure_freq_hz: f64,

    /// Units: milliseconds
    pub tone_ms: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Feedback implementation selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    None,
    Log,
    Buzzer,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Feedback for NoFeedback {
    fn success(&mut self) {}

    fn failure(&mut self) {}
}

impl Feedback for LogFeedback {
    fn success(&mut self) {
        info!("Move OK");
    }

    fn failure(&mut self) {
        info!("Move FAILED");
    }
}

impl Default for BuzzerParams {
    fn default() -> Self {
        Self {
            success_freq_hz: 2000.0,
            failure_freq_hz: 400.0,
            tone_ms: 50,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// BUZZER
// ------------------------------------------------------------------------------------------------

#[cfg(all(target_arch = "arm", target_os = "linux"))]
pub use buzzer::BuzzerFeedback;

#[cfg(all(target_arch = "arm", target_os = "linux"))]
mod buzzer {
    use super::{BuzzerParams, Feedback};
    use log::warn;
    use rppal::pwm::{Channel, Polarity, Pwm};
    use std::{thread, time::Duration};

    /// Piezo buzzer on a hardware PWM pin, playing a high tone on success and
    /// a low tone on failure.
    pub struct BuzzerFeedback {
        pwm: Pwm,
        params: BuzzerParams,
    }

    impl BuzzerFeedback {
        pub fn new(params: BuzzerParams) -> rppal::pwm::Result<Self> {
            let pwm = Pwm::with_frequency(
                Channel::Pwm0,
                params.success_freq_hz,
                0.5,
                Polarity::Normal,
                false,
            )?;

            Ok(Self { pwm, params })
        }

        fn tone(&mut self, freq_hz: f64) {
            if let Err(e) = self.play(freq_hz) {
                warn!("Buzzer error: {}", e);
            }
        }

        fn play(&mut self, freq_hz: f64) -> rppal::pwm::Result<()> {
            self.pwm.set_frequency(freq_hz, 0.5)?;
            self.pwm.enable()?;
            thread::sleep(Duration::from_millis(self.params.tone_ms));
            self.pwm.disable()
        }
    }

    impl Feedback for BuzzerFeedback {
        fn success(&mut self) {
            let freq_hz = self.params.success_freq_hz;
            self.tone(freq_hz);
        }

        fn failure(&mut self) {
            let freq_hz = self.params.failure_freq_hz;
            self.tone(freq_hz);
        }
    }
}
