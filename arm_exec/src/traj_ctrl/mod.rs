//! Trajectory control module
//!
//! Breaks a relative displacement into unit steps and feeds each resulting
//! absolute point to a [`PointMover`]. Displacements are counted in unit
//! steps, each of which is `step_size_mm` in the drawing plane.
//!
//! A step which cannot be reached does not stop the line: the mover stays
//! where it is and the following steps are still attempted. Lines always run
//! to completion.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod line;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use line::*;

use serde::Serialize;

use crate::arm_ctrl::{ArmCtrl, ArmCtrlError, MoveOutcome, Position};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Moves the pen one absolute point at a time.
pub trait PointMover {
    /// Current believed position.
    fn position(&self) -> Position;

    /// Length of one unit step.
    ///
    /// Units: millimeters
    fn step_size_mm(&self) -> i32;

    /// Attempt to move to an absolute point. See [`ArmCtrl::move_to`].
    fn move_to(&mut self, target: Position) -> Result<MoveOutcome, ArmCtrlError>;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Summary of one trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrajReport {
    /// Number of point moves attempted
    pub num_moves: u32,

    /// Number of those which were out of reach
    pub num_unreachable: u32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajReport {
    pub(crate) fn add(&mut self, outcome: MoveOutcome) {
        self.num_moves += 1;
        if outcome == MoveOutcome::Unreachable {
            self.num_unreachable += 1;
        }
    }
}

impl PointMover for ArmCtrl {
    fn position(&self) -> Position {
        ArmCtrl::position(self)
    }

    fn step_size_mm(&self) -> i32 {
        self.geometry.step_size_mm
    }

    fn move_to(&mut self, target: Position) -> Result<MoveOutcome, ArmCtrlError> {
        ArmCtrl::move_to(self, target)
    }
}
