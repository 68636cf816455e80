//! Mock collaborators shared by the unit tests.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use comms_if::eqpt::mech::MechDems;
use embedded_hal::blocking::delay::DelayMs;

use crate::{
    arm_ctrl::{Actuator, ArmCtrl, ArmCtrlError, MoveOutcome, JointAngles, Params, Position},
    feedback::Feedback,
    servo_ctrl::ServoError,
    trace::{MoveRecord, MoveTracer},
    traj_ctrl::PointMover,
};

/// Actuator which keeps every demand it is given.
#[derive(Clone, Default)]
pub struct RecordingActuator {
    dems: Rc<RefCell<Vec<MechDems>>>,
    fail: bool,
}

impl RecordingActuator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn dems(&self) -> Vec<MechDems> {
        self.dems.borrow().clone()
    }
}

impl Actuator for RecordingActuator {
    fn actuate(&mut self, dems: &MechDems) -> Result<(), ServoError> {
        if self.fail {
            return Err(ServoError::I2c);
        }
        self.dems.borrow_mut().push(dems.clone());
        Ok(())
    }
}

/// Delay which counts calls instead of sleeping.
#[derive(Clone, Default)]
pub struct CountingDelay {
    calls: Rc<Cell<u32>>,
    total_ms: Rc<Cell<u64>>,
}

impl CountingDelay {
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms.get()
    }
}

impl DelayMs<u32> for CountingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls.set(self.calls.get() + 1);
        self.total_ms.set(self.total_ms.get() + ms as u64);
    }
}

#[derive(Clone, Default)]
pub struct CountingFeedback {
    successes: Rc<Cell<u32>>,
    failures: Rc<Cell<u32>>,
}

impl CountingFeedback {
    pub fn successes(&self) -> u32 {
        self.successes.get()
    }

    pub fn failures(&self) -> u32 {
        self.failures.get()
    }
}

impl Feedback for CountingFeedback {
    fn success(&mut self) {
        self.successes.set(self.successes.get() + 1);
    }

    fn failure(&mut self) {
        self.failures.set(self.failures.get() + 1);
    }
}

#[derive(Clone, Default)]
pub struct RecordingTracer {
    records: Rc<RefCell<Vec<MoveRecord>>>,
}

impl RecordingTracer {
    pub fn records(&self) -> Vec<MoveRecord> {
        self.records.borrow().clone()
    }
}

impl MoveTracer for RecordingTracer {
    fn record(&mut self, record: &MoveRecord) {
        self.records.borrow_mut().push(record.clone());
    }
}

/// A real [`ArmCtrl`] wired to mocks, with handles to inspect them.
pub struct TestRig {
    pub ctrl: ArmCtrl,
    pub actuator: RecordingActuator,
    pub delay: CountingDelay,
    pub feedback: CountingFeedback,
    pub tracer: RecordingTracer,
}

impl TestRig {
    pub fn new(params: Params) -> Self {
        Self::build(params, RecordingActuator::default())
    }

    pub fn with_failing_actuator(params: Params) -> Self {
        Self::build(params, RecordingActuator::failing())
    }

    fn build(params: Params, actuator: RecordingActuator) -> Self {
        let delay = CountingDelay::default();
        let feedback = CountingFeedback::default();
        let tracer = RecordingTracer::default();

        let ctrl = ArmCtrl::new(&params, Box::new(actuator.clone()))
            .unwrap()
            .with_delay(Box::new(delay.clone()))
            .with_feedback(Box::new(feedback.clone()))
            .with_tracer(Box::new(tracer.clone()));

        Self {
            ctrl,
            actuator,
            delay,
            feedback,
            tracer,
        }
    }
}

/// Point mover which records every target and treats points with
/// `x > max_x_mm` as unreachable.
pub struct MockMover {
    pub position: Position,
    pub step_size_mm: i32,
    pub max_x_mm: i32,
    pub calls: Vec<Position>,
}

impl MockMover {
    pub fn new(start: Position, step_size_mm: i32) -> Self {
        Self {
            position: start,
            step_size_mm,
            max_x_mm: i32::MAX,
            calls: Vec::new(),
        }
    }
}

impl PointMover for MockMover {
    fn position(&self) -> Position {
        self.position
    }

    fn step_size_mm(&self) -> i32 {
        self.step_size_mm
    }

    fn move_to(&mut self, target: Position) -> Result<MoveOutcome, ArmCtrlError> {
        self.calls.push(target);

        if target.x_mm > self.max_x_mm {
            Ok(MoveOutcome::Unreachable)
        } else {
            self.position = target;
            Ok(MoveOutcome::Reached(JointAngles {
                shoulder_deg: 90.0,
                elbow_deg: 90.0,
            }))
        }
    }
}
