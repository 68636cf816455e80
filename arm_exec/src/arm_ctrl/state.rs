//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::mech::MechDems;
use embedded_hal::blocking::delay::DelayMs;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

// Internal
use super::{ArmCtrlError, ArmGeometry, MoveOutcome, Params};
use crate::{
    delay::StdDelay,
    feedback::{Feedback, NoFeedback},
    servo_ctrl::ServoError,
    trace::{MoveRecord, MoveTracer, NoTrace},
};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something which can put the arm's joints at demanded angles.
///
/// Demands are applied immediately, no position feedback is read back.
pub trait Actuator {
    fn actuate(&mut self, dems: &MechDems) -> Result<(), ServoError>;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A point in the drawing plane.
///
/// Units: millimeters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x_mm: i32,
    pub y_mm: i32,
}

/// Arm control module state
pub struct ArmCtrl {
    pub(crate) geometry: ArmGeometry,

    /// Last point the arm was successfully moved to
    pub(crate) position: Position,

    pub(crate) home: Position,

    pub(crate) settle_delay_ms: u32,

    pub(crate) report: StatusReport,

    actuator: Box<dyn Actuator>,

    delay: Box<dyn DelayMs<u32>>,

    feedback: Box<dyn Feedback>,

    tracer: Box<dyn MoveTracer>,
}

/// Running totals of move attempts.
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub num_reached: u64,
    pub num_unreachable: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Position {
    pub fn new(x_mm: i32, y_mm: i32) -> Self {
        Self { x_mm, y_mm }
    }

    /// Raise the point onto the floor if it is below it. `x` is never changed.
    pub fn clamp_to_floor(self, min_y_mm: i32) -> Self {
        Self {
            x_mm: self.x_mm,
            y_mm: self.y_mm.max(min_y_mm),
        }
    }

    /// The point offset by `(dx_mm, dy_mm)`.
    pub fn offset(self, dx_mm: i32, dy_mm: i32) -> Self {
        Self {
            x_mm: self.x_mm + dx_mm,
            y_mm: self.y_mm + dy_mm,
        }
    }
}

impl From<[i32; 2]> for Position {
    fn from(p: [i32; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl ArmCtrl {
    /// Create the arm controller.
    ///
    /// The believed position starts at the home point, no move is made. Call
    /// [`ArmCtrl::home`] to physically put the arm there.
    ///
    /// Feedback and tracing default to no-ops and the settle delay sleeps the
    /// current thread.
    pub fn new(params: &Params, actuator: Box<dyn Actuator>) -> Result<Self, ArmCtrlError> {
        let geometry = ArmGeometry::new(params)?;
        let home = Position::from(params.home_pos_mm).clamp_to_floor(geometry.min_y_mm);

        Ok(Self {
            geometry,
            position: home,
            home,
            settle_delay_ms: params.settle_delay_ms,
            report: StatusReport::default(),
            actuator,
            delay: Box::new(StdDelay),
            feedback: Box::new(NoFeedback),
            tracer: Box::new(NoTrace),
        })
    }

    /// Replace the settle delay provider.
    pub fn with_delay(mut self, delay: Box<dyn DelayMs<u32>>) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the feedback channel.
    pub fn with_feedback(mut self, feedback: Box<dyn Feedback>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Replace the move tracer.
    pub fn with_tracer(mut self, tracer: Box<dyn MoveTracer>) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn home_position(&self) -> Position {
        self.home
    }

    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    pub fn report(&self) -> StatusReport {
        self.report
    }

    /// Move the pen to an absolute point.
    ///
    /// The point is first raised onto the floor. If it can be solved both
    /// joints are actuated and the position updated, otherwise the position
    /// is left alone and failure is signalled. Either way this blocks for the
    /// settle delay before returning.
    ///
    /// Only an actuator fault returns an error.
    pub fn move_to(&mut self, target: Position) -> Result<MoveOutcome, ArmCtrlError> {
        let clamped = target.clamp_to_floor(self.geometry.min_y_mm);
        let outcome = self.geometry.solve(clamped);

        self.tracer.record(&MoveRecord::new(target, clamped, &outcome));

        let actuation = match outcome {
            MoveOutcome::Reached(angles) => {
                trace!(
                    "Moving to ({}, {}): shoulder {:.2} deg, elbow {:.2} deg",
                    clamped.x_mm, clamped.y_mm, angles.shoulder_deg, angles.elbow_deg
                );

                let result = self.actuator.actuate(&angles.to_dems());
                if result.is_ok() {
                    self.position = clamped;
                    self.report.num_reached += 1;
                    self.feedback.success();
                }
                result
            }
            MoveOutcome::Unreachable => {
                warn!(
                    "Target ({}, {}) is out of reach, staying at ({}, {})",
                    clamped.x_mm, clamped.y_mm, self.position.x_mm, self.position.y_mm
                );
                self.report.num_unreachable += 1;
                self.feedback.failure();
                Ok(())
            }
        };

        self.delay.delay_ms(self.settle_delay_ms);

        actuation?;

        Ok(outcome)
    }

    /// Move to the home point.
    pub fn home(&mut self) -> Result<MoveOutcome, ArmCtrlError> {
        debug!("Homing to ({}, {})", self.home.x_mm, self.home.y_mm);
        self.move_to(self.home)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::*;
    use comms_if::eqpt::mech::ActId;

    #[test]
    fn test_clamp_to_floor() {
        assert_eq!(Position::new(-40, 3).clamp_to_floor(20), Position::new(-40, 20));
        assert_eq!(Position::new(15, -100).clamp_to_floor(20), Position::new(15, 20));
        assert_eq!(Position::new(15, 60).clamp_to_floor(20), Position::new(15, 60));
    }

    #[test]
    fn test_move_reachable() {
        let mut rig = TestRig::new(Params::default());

        let outcome = rig.ctrl.move_to(Position::new(30, 100)).unwrap();

        assert!(matches!(outcome, MoveOutcome::Reached(_)));
        assert_eq!(rig.ctrl.position(), Position::new(30, 100));
        assert_eq!(rig.actuator.dems().len(), 1);
        assert_eq!(rig.feedback.successes(), 1);
        assert_eq!(rig.feedback.failures(), 0);
        assert_eq!(rig.delay.calls(), 1);
        assert_eq!(rig.delay.total_ms(), 100);

        // Demanded angles put the pen back on the target
        let dems = &rig.actuator.dems()[0];
        let (x, y) = rig.ctrl.geometry().forward(&crate::arm_ctrl::JointAngles {
            shoulder_deg: dems.pos_deg[&ActId::ArmShoulder],
            elbow_deg: dems.pos_deg[&ActId::ArmElbow],
        });
        assert!((x - 30.0).abs() < 1e-6 && (y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_below_floor_is_clamped() {
        let mut rig = TestRig::new(Params::default());

        rig.ctrl.move_to(Position::new(-50, -30)).unwrap();

        assert_eq!(rig.ctrl.position(), Position::new(-50, 20));
        assert_eq!(rig.tracer.records()[0].target_y_mm, -30);
        assert_eq!(rig.tracer.records()[0].clamped_y_mm, 20);
    }

    #[test]
    fn test_move_unreachable_keeps_position() {
        let mut rig = TestRig::new(Params::default());
        rig.ctrl.move_to(Position::new(0, 44)).unwrap();
        let before = rig.ctrl.position();

        let outcome = rig.ctrl.move_to(Position::new(300, 20)).unwrap();

        assert_eq!(outcome, MoveOutcome::Unreachable);
        assert_eq!(rig.ctrl.position(), before);
        assert_eq!(rig.actuator.dems().len(), 1);
        assert_eq!(rig.feedback.failures(), 1);
        assert_eq!(rig.delay.calls(), 2);
        assert_eq!(
            rig.ctrl.report(),
            StatusReport {
                num_reached: 1,
                num_unreachable: 1
            }
        );
    }

    #[test]
    fn test_actuator_fault_still_settles() {
        let mut rig = TestRig::with_failing_actuator(Params::default());

        let result = rig.ctrl.move_to(Position::new(0, 44));

        assert!(matches!(result, Err(ArmCtrlError::Actuation(_))));
        assert_eq!(rig.ctrl.position(), Position::new(0, 20));
        assert_eq!(rig.feedback.successes(), 0);
        assert_eq!(rig.delay.calls(), 1);
    }

    #[test]
    fn test_home() {
        let mut rig = TestRig::new(Params {
            home_pos_mm: [10, 5],
            ..Params::default()
        });

        // Home below the floor is raised onto it
        assert_eq!(rig.ctrl.home_position(), Position::new(10, 20));

        rig.ctrl.move_to(Position::new(-60, 120)).unwrap();
        rig.ctrl.home().unwrap();
        assert_eq!(rig.ctrl.position(), Position::new(10, 20));
    }
}
