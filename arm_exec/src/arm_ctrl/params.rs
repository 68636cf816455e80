//! Parameters structure for ArmCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Arm control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----
    /// The length of the shoulder link, from the base joint to the elbow.
    ///
    /// Units: millimeters.
    pub shoulder_length_mm: f64,

    /// The length of the elbow link, from the elbow to the pen.
    ///
    /// Units: millimeters.
    pub elbow_length_mm: f64,

    // ---- WORKSPACE ----
    /// Distance covered by one unit step of a trajectory. The maximum reach is
    /// reduced by this much so the next step of a line stays feasible.
    ///
    /// Units: millimeters.
    pub step_size_mm: i32,

    /// Lowest allowed y coordinate. Targets below it are raised onto it.
    ///
    /// Units: millimeters.
    pub min_y_mm: i32,

    /// Home point, moved to on startup and on the home command.
    ///
    /// Units: millimeters.
    pub home_pos_mm: [i32; 2],

    // ---- TIMING ----
    /// Time to wait after every move attempt for the servos to finish
    /// travelling.
    ///
    /// Units: milliseconds.
    pub settle_delay_ms: u32,

    // ---- COMMANDS ----
    /// Length of the line drawn by one directional command.
    ///
    /// Units: unit steps.
    pub cmd_steps: i32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            shoulder_length_mm: 110.0,
            elbow_length_mm: 100.0,
            step_size_mm: 8,
            min_y_mm: 20,
            home_pos_mm: [0, 20],
            settle_delay_ms: 100,
            cmd_steps: 1,
        }
    }
}
