//! # Communications interface crate.
//!
//! Provides the common interfaces shared between the arm control core and the
//! input and actuation collaborators.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Command definitions recieved over the input channel
pub mod tc;

/// Demand definitions for equipment (like the arm servos)
pub mod eqpt;
