//! # Command processor
//!
//! Turns decoded commands into trajectories. Each command runs to completion
//! before the next one is processed.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::tc::arm_ctrl::ArmCmd;
use log::{debug, trace};

use crate::{
    arm_ctrl::{ArmCtrlError, Position},
    traj_ctrl::{line, line_horizontal, line_vertical, PointMover, TrajReport},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Maps commands onto the trajectory generators.
#[derive(Debug, Clone, Copy)]
pub struct CmdProcessor {
    /// Home point for [`ArmCmd::Home`]
    home: Position,

    /// Length of each directional line, in unit steps
    cmd_steps: i32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CmdProcessor {
    pub fn new(home: Position, cmd_steps: i32) -> Self {
        Self { home, cmd_steps }
    }

    /// Decode and execute one input byte.
    ///
    /// Returns `None` if the byte is not a command, in which case nothing is
    /// moved.
    pub fn process_symbol<M>(
        &self,
        mover: &mut M,
        symbol: u8,
    ) -> Result<Option<TrajReport>, ArmCtrlError>
    where
        M: PointMover + ?Sized,
    {
        match ArmCmd::from_symbol(symbol) {
            Some(cmd) => self.process(mover, cmd).map(Some),
            None => {
                trace!("Ignoring input byte {:#04x}", symbol);
                Ok(None)
            }
        }
    }

    /// Execute one command.
    pub fn process<M>(&self, mover: &mut M, cmd: ArmCmd) -> Result<TrajReport, ArmCtrlError>
    where
        M: PointMover + ?Sized,
    {
        debug!("Processing ArmCmd::{:?}", cmd);

        match cmd {
            ArmCmd::Home => {
                let mut report = TrajReport::default();
                report.add(mover.move_to(self.home)?);
                Ok(report)
            }
            ArmCmd::Line(heading) => {
                let (ux, uy) = heading.unit();
                let (dx, dy) = (ux * self.cmd_steps, uy * self.cmd_steps);

                if heading.is_diagonal() {
                    line(mover, dx, dy)
                } else if dy == 0 {
                    line_horizontal(mover, dx)
                } else {
                    line_vertical(mover, dy)
                }
            }
        }
    }
}
