//! Arm inverse kinematics calculations
//!
//! The arm is a planar two-link manipulator with its base at the origin. The
//! pen position is solved analytically with the law of cosines, taking the
//! elbow-clockwise solution.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::mech::MechDems;
use serde::Serialize;
use std::f64::consts::PI;

// Internal imports
use super::{ArmCtrlError, Params, Position};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Immutable geometry of the arm, derived once from [`Params`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArmGeometry {
    /// Shoulder link length, `L1`.
    ///
    /// Units: millimeters
    pub shoulder_length_mm: f64,

    /// Elbow link length, `L2`.
    ///
    /// Units: millimeters
    pub elbow_length_mm: f64,

    /// Distance covered by one unit step.
    ///
    /// Units: millimeters
    pub step_size_mm: i32,

    /// Lowest allowed y coordinate.
    ///
    /// Units: millimeters
    pub min_y_mm: i32,

    /// Largest radius accepted by the solver, `L1 + L2 - step`.
    ///
    /// Units: millimeters
    pub max_reach_mm: f64,

    /// Smallest radius the law of cosines can solve, `|L1 - L2|`.
    ///
    /// Units: millimeters
    pub min_reach_mm: f64,

    /// `L1² - L2²`
    diff_sq_mm2: f64,

    /// `L1² + L2²`
    sum_sq_mm2: f64,

    /// `2·L1`
    two_l1_mm: f64,

    /// `2·L1·L2`
    two_l1_l2_mm2: f64,
}

/// Demanded angles of both joints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointAngles {
    /// Units: degrees
    pub shoulder_deg: f64,

    /// Units: degrees
    pub elbow_deg: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Result of one attempt to solve for a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Reached(JointAngles),
    Unreachable,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmGeometry {
    /// Build the geometry from the arm parameters.
    pub fn new(params: &Params) -> Result<Self, ArmCtrlError> {
        let l1 = params.shoulder_length_mm;
        let l2 = params.elbow_length_mm;

        if !(l1 > 0.0 && l2 > 0.0) {
            return Err(ArmCtrlError::InvalidGeometry(format!(
                "link lengths must be positive, found {} and {}",
                l1, l2
            )));
        }
        if params.step_size_mm <= 0 {
            return Err(ArmCtrlError::InvalidGeometry(format!(
                "step size must be positive, found {}",
                params.step_size_mm
            )));
        }
        if params.min_y_mm <= 0 {
            return Err(ArmCtrlError::InvalidGeometry(format!(
                "minimum y must be above the arm base, found {}",
                params.min_y_mm
            )));
        }

        let max_reach_mm = l1 + l2 - params.step_size_mm as f64;
        let min_reach_mm = (l1 - l2).abs();

        if max_reach_mm <= min_reach_mm {
            return Err(ArmCtrlError::InvalidGeometry(format!(
                "no reachable workspace between {} and {} mm",
                min_reach_mm, max_reach_mm
            )));
        }

        Ok(Self {
            shoulder_length_mm: l1,
            elbow_length_mm: l2,
            step_size_mm: params.step_size_mm,
            min_y_mm: params.min_y_mm,
            max_reach_mm,
            min_reach_mm,
            diff_sq_mm2: l1.powi(2) - l2.powi(2),
            sum_sq_mm2: l1.powi(2) + l2.powi(2),
            two_l1_mm: 2.0 * l1,
            two_l1_l2_mm2: 2.0 * l1 * l2,
        })
    }

    /// Solve the joint angles which put the pen at `target`.
    ///
    /// `target` is expected to already be clamped onto the floor. Points
    /// further than `max_reach_mm` or closer than `min_reach_mm` from the base
    /// are unreachable.
    pub fn solve(&self, target: Position) -> MoveOutcome {
        let x = target.x_mm as f64;
        let y = target.y_mm as f64;

        let r2 = x.powi(2) + y.powi(2);
        let r = r2.sqrt();

        if r > self.max_reach_mm || r < self.min_reach_mm || r == 0.0 {
            return MoveOutcome::Unreachable;
        }

        // Angle of the target line from +x
        let base_rad = acos_limited(x / r);

        // Angle between the shoulder link and the target line
        let shoulder_offset_rad = acos_limited((self.diff_sq_mm2 + r2) / (self.two_l1_mm * r));

        // Interior angle at the elbow
        let elbow_rad = acos_limited((self.sum_sq_mm2 - r2) / self.two_l1_l2_mm2);

        MoveOutcome::Reached(JointAngles {
            shoulder_deg: 180.0 - (base_rad - shoulder_offset_rad).to_degrees(),
            elbow_deg: 180.0 - (PI - elbow_rad).to_degrees(),
        })
    }

    /// Pen position for a pair of joint angles, inverse of [`Self::solve`].
    ///
    /// Units: millimeters
    pub fn forward(&self, angles: &JointAngles) -> (f64, f64) {
        let shoulder_rad = PI - angles.shoulder_deg.to_radians();
        let elbow_link_rad = shoulder_rad + PI - angles.elbow_deg.to_radians();

        (
            self.shoulder_length_mm * shoulder_rad.cos()
                + self.elbow_length_mm * elbow_link_rad.cos(),
            self.shoulder_length_mm * shoulder_rad.sin()
                + self.elbow_length_mm * elbow_link_rad.sin(),
        )
    }
}

impl JointAngles {
    /// Convert into demands for the servo controller.
    pub fn to_dems(&self) -> MechDems {
        MechDems::from_joint_angles(self.shoulder_deg, self.elbow_deg)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// `acos` with its argument limited to `[-1, 1]` to absorb rounding error at
/// the edges of the workspace.
fn acos_limited(value: f64) -> f64 {
    value.max(-1.0).min(1.0).acos()
}
