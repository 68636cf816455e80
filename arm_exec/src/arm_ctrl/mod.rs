//! Arm control module
//!
//! Converts absolute target points in the drawing plane into joint angles for
//! the two-link arm, and owns the arm's believed position.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod inverse_kinematics;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use inverse_kinematics::*;
pub use params::*;
pub use state::*;

use crate::servo_ctrl::ServoError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ArmCtrl operation.
///
/// An unreachable target is not an error, it is reported as
/// [`MoveOutcome::Unreachable`].
#[derive(Debug, thiserror::Error)]
pub enum ArmCtrlError {
    #[error("Invalid arm geometry: {0}")]
    InvalidGeometry(String),

    #[error("Could not actuate the arm: {0}")]
    Actuation(#[from] ServoError),
}
