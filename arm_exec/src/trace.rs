//! # Move tracing
//!
//! Diagnostic record of every move attempt: the requested point, the point
//! after clamping onto the floor, and the solved angles.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use util::archive::Archiver;

use crate::arm_ctrl::{MoveOutcome, Position};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Receives one record per move attempt.
pub trait MoveTracer {
    fn record(&mut self, record: &MoveRecord);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One move attempt, flattened so it can be written as a CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveRecord {
    pub target_x_mm: i32,
    pub target_y_mm: i32,
    pub clamped_x_mm: i32,
    pub clamped_y_mm: i32,
    pub reached: bool,
    pub shoulder_deg: Option<f64>,
    pub elbow_deg: Option<f64>,
}

/// Tracing disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

/// Human-readable trace lines at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

/// Trace rows appended to a CSV file in the session archive.
pub struct ArchiveTracer {
    archiver: Archiver,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Tracer implementation selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    None,
    Log,
    Archive,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MoveRecord {
    pub fn new(target: Position, clamped: Position, outcome: &MoveOutcome) -> Self {
        let (reached, shoulder_deg, elbow_deg) = match outcome {
            MoveOutcome::Reached(a) => (true, Some(a.shoulder_deg), Some(a.elbow_deg)),
            MoveOutcome::Unreachable => (false, None, None),
        };

        Self {
            target_x_mm: target.x_mm,
            target_y_mm: target.y_mm,
            clamped_x_mm: clamped.x_mm,
            clamped_y_mm: clamped.y_mm,
            reached,
            shoulder_deg,
            elbow_deg,
        }
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "in ({}, {}) clamped ({}, {}) ",
            self.target_x_mm, self.target_y_mm, self.clamped_x_mm, self.clamped_y_mm
        )?;

        match (self.shoulder_deg, self.elbow_deg) {
            (Some(s), Some(e)) => write!(f, "angles ({:.2}, {:.2})", s, e),
            _ => write!(f, "unreachable"),
        }
    }
}

impl MoveTracer for NoTrace {
    fn record(&mut self, _record: &MoveRecord) {}
}

impl MoveTracer for LogTracer {
    fn record(&mut self, record: &MoveRecord) {
        debug!("{}", record);
    }
}

impl ArchiveTracer {
    pub fn new(archiver: Archiver) -> Self {
        Self { archiver }
    }
}

impl MoveTracer for ArchiveTracer {
    fn record(&mut self, record: &MoveRecord) {
        if let Err(e) = self.archiver.serialise(record) {
            warn!("Could not archive move record: {}", e);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arm_ctrl::JointAngles;
    use util::session::Session;

    #[test]
    fn test_record_display() {
        let reached = MoveRecord::new(
            Position::new(5, 10),
            Position::new(5, 20),
            &MoveOutcome::Reached(JointAngles {
                shoulder_deg: 120.0,
                elbow_deg: 33.333,
            }),
        );
        assert_eq!(
            reached.to_string(),
            "in (5, 10) clamped (5, 20) angles (120.00, 33.33)"
        );

        let missed = MoveRecord::new(
            Position::new(300, 20),
            Position::new(300, 20),
            &MoveOutcome::Unreachable,
        );
        assert!(!missed.reached);
        assert_eq!(missed.to_string(), "in (300, 20) clamped (300, 20) unreachable");
    }

    #[test]
    fn test_archive_tracer_writes_rows() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new_in(dir.path(), "trace_test").unwrap();
        let mut tracer =
            ArchiveTracer::new(Archiver::from_path(&session, "moves.csv").unwrap());

        tracer.record(&MoveRecord::new(
            Position::new(300, 20),
            Position::new(300, 20),
            &MoveOutcome::Unreachable,
        ));

        let contents = std::fs::read_to_string(session.arch_root.join("moves.csv")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "target_x_mm,target_y_mm,clamped_x_mm,clamped_y_mm,reached,shoulder_deg,elbow_deg"
        );
        assert_eq!(lines[1], "300,20,300,20,false,,");
    }
}
