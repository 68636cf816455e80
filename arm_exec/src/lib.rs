//! # Arm library.
//!
//! Motion control for a two-joint drawing arm. Commands decoded from the input
//! channel become lines, lines become single point moves, and each point move
//! is solved into joint angles for the servos.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Arm control - inverse kinematics, position state and single point moves
pub mod arm_ctrl;

/// Command processor - maps commands onto trajectories
pub mod cmd_processor;

/// Command source - reads command bytes from the input channel
pub mod cmd_source;

/// Settle delay
pub mod delay;

/// Feedback - signals the outcome of each move
pub mod feedback;

/// Executable parameters
pub mod params;

/// Servo control - drives the joints through a servo driver board
pub mod servo_ctrl;

/// Trace - diagnostic record of each move
pub mod trace;

/// Trajectory control - breaks lines into unit steps
pub mod traj_ctrl;

#[cfg(test)]
mod test_utils;
