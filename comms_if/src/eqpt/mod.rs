//! # Equipment Interface
//!
//! This module defines the interface structures which will be sent to equipment drivers.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod mech;
