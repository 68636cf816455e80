//! # Telecommand module
//!
//! Commands arrive one byte at a time on the input channel. Each recognised
//! byte decodes into a single command, anything else is ignored.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod arm_ctrl;
