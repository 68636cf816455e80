//! Line trajectories

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use super::{PointMover, TrajReport};
use crate::arm_ctrl::ArmCtrlError;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Draw a horizontal line of `dx` unit steps.
///
/// Makes `|dx|` moves, the first one step away from the current position and
/// the last at `x + dx` steps. The current point is not revisited.
pub fn line_horizontal<M>(mover: &mut M, dx: i32) -> Result<TrajReport, ArmCtrlError>
where
    M: PointMover + ?Sized,
{
    let start = mover.position();
    let step_mm = mover.step_size_mm() * dx.signum();
    let mut report = TrajReport::default();

    debug!("Horizontal line of {} steps from {:?}", dx, start);

    for i in 1..=dx.abs() {
        report.add(mover.move_to(start.offset(i * step_mm, 0))?);
    }

    Ok(report)
}

/// Draw a vertical line of `dy` unit steps.
///
/// Same as [`line_horizontal`] along the y axis.
pub fn line_vertical<M>(mover: &mut M, dy: i32) -> Result<TrajReport, ArmCtrlError>
where
    M: PointMover + ?Sized,
{
    let start = mover.position();
    let step_mm = mover.step_size_mm() * dy.signum();
    let mut report = TrajReport::default();

    debug!("Vertical line of {} steps from {:?}", dy, start);

    for j in 1..=dy.abs() {
        report.add(mover.move_to(start.offset(0, j * step_mm))?);
    }

    Ok(report)
}

/// Draw a line of any slope, `(dx, dy)` unit steps long.
///
/// The line is rasterised onto the step grid anchored at the current position
/// with an integer error term, giving a connected path of horizontal, vertical
/// and diagonal unit steps. Makes `max(|dx|, |dy|)` moves, the current point
/// is not revisited. A zero length line makes exactly one move, to the current
/// point.
pub fn line<M>(mover: &mut M, dx: i32, dy: i32) -> Result<TrajReport, ArmCtrlError>
where
    M: PointMover + ?Sized,
{
    let start = mover.position();
    let step_mm = mover.step_size_mm();
    let mut report = TrajReport::default();

    debug!("Line of ({}, {}) steps from {:?}", dx, dy, start);

    let (abs_dx, abs_dy) = (dx.abs(), dy.abs());
    let (sign_x, sign_y) = (dx.signum(), dy.signum());

    if dx == 0 && dy == 0 {
        report.add(mover.move_to(start)?);
        return Ok(report);
    }

    let mut err = (if abs_dx >= abs_dy { abs_dx } else { -abs_dy }) / 2;

    // Grid position relative to the start
    let (mut i, mut j) = (0, 0);

    while i != dx || j != dy {
        let e = err;
        if e > -abs_dx {
            err -= abs_dy;
            i += sign_x;
        }
        if e < abs_dy {
            err += abs_dx;
            j += sign_y;
        }

        report.add(mover.move_to(start.offset(i * step_mm, j * step_mm))?);
    }

    Ok(report)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arm_ctrl::{Params, Position};
    use crate::test_utils::{MockMover, TestRig};

    const STEP: i32 = 8;

    /// Every consecutive pair of points is one unit step apart in 8-connected
    /// sense.
    fn assert_connected(points: &[Position]) {
        for pair in points.windows(2) {
            let ddx = pair[1].x_mm - pair[0].x_mm;
            let ddy = pair[1].y_mm - pair[0].y_mm;
            assert!(
                ddx.abs() <= STEP && ddy.abs() <= STEP && (ddx, ddy) != (0, 0),
                "{:?} -> {:?} is not a unit step",
                pair[0],
                pair[1]
            );
            assert!(ddx % STEP == 0 && ddy % STEP == 0);
        }
    }

    #[test]
    fn test_horizontal() {
        let start = Position::new(-16, 60);
        let mut mover = MockMover::new(start, STEP);

        let report = line_horizontal(&mut mover, 5).unwrap();

        assert_eq!(report, TrajReport { num_moves: 5, num_unreachable: 0 });
        assert_eq!(mover.calls.len(), 5);
        assert_eq!(mover.calls[0], Position::new(-8, 60));
        assert_eq!(*mover.calls.last().unwrap(), Position::new(-16 + 5 * STEP, 60));
        assert!(mover.calls.iter().all(|p| p.y_mm == 60));
        assert_connected(&[&[start][..], &mover.calls[..]].concat());

        let mut mover = MockMover::new(start, STEP);
        line_horizontal(&mut mover, -3).unwrap();
        assert_eq!(mover.calls.len(), 3);
        assert_eq!(*mover.calls.last().unwrap(), Position::new(-16 - 3 * STEP, 60));
    }

    #[test]
    fn test_vertical() {
        let start = Position::new(12, 100);
        let mut mover = MockMover::new(start, STEP);

        let report = line_vertical(&mut mover, -4).unwrap();

        assert_eq!(report.num_moves, 4);
        assert_eq!(
            mover.calls,
            vec![
                Position::new(12, 92),
                Position::new(12, 84),
                Position::new(12, 76),
                Position::new(12, 68),
            ]
        );
    }

    #[test]
    fn test_axis_lines_of_zero_length() {
        let mut mover = MockMover::new(Position::new(0, 20), STEP);

        assert_eq!(line_horizontal(&mut mover, 0).unwrap().num_moves, 0);
        assert_eq!(line_vertical(&mut mover, 0).unwrap().num_moves, 0);
        assert!(mover.calls.is_empty());
    }

    #[test]
    fn test_line_zero_length_moves_once() {
        let start = Position::new(40, 80);
        let mut mover = MockMover::new(start, STEP);

        let report = line(&mut mover, 0, 0).unwrap();

        assert_eq!(report.num_moves, 1);
        assert_eq!(mover.calls, vec![start]);
    }

    #[test]
    fn test_line_diagonal() {
        let start = Position::new(0, 40);
        let mut mover = MockMover::new(start, STEP);

        line(&mut mover, 5, 5).unwrap();

        // Five diagonal steps
        assert_eq!(mover.calls.len(), 5);
        for (k, p) in mover.calls.iter().enumerate() {
            let k = k as i32 + 1;
            assert_eq!(*p, start.offset(k * STEP, k * STEP));
        }
        assert_eq!(mover.position, start.offset(5 * STEP, 5 * STEP));
    }

    #[test]
    fn test_line_all_directions() {
        let start = Position::new(0, 100);

        for dx in -6..=6 {
            for dy in -6..=6 {
                let mut mover = MockMover::new(start, STEP);

                let report = line(&mut mover, dx, dy).unwrap();

                let expected_moves = dx.abs().max(dy.abs()).max(1);
                assert_eq!(report.num_moves as i32, expected_moves, "({}, {})", dx, dy);
                assert_eq!(
                    *mover.calls.last().unwrap(),
                    start.offset(dx * STEP, dy * STEP),
                    "({}, {})",
                    dx,
                    dy
                );
                if (dx, dy) == (0, 0) {
                    continue;
                }

                let path = [&[start][..], &mover.calls[..]].concat();
                assert_connected(&path);

                // Never moves against the direction of travel
                for pair in path.windows(2) {
                    assert!((pair[1].x_mm - pair[0].x_mm) * dx >= 0);
                    assert!((pair[1].y_mm - pair[0].y_mm) * dy >= 0);
                }
            }
        }
    }

    #[test]
    fn test_shallow_line_shape() {
        let start = Position::new(0, 100);
        let mut mover = MockMover::new(start, 1);

        line(&mut mover, 3, 1).unwrap();

        assert_eq!(
            mover.calls,
            vec![
                Position::new(1, 100),
                Position::new(2, 101),
                Position::new(3, 101),
            ]
        );
    }

    #[test]
    fn test_stall_then_resume() {
        // Start beyond the reachable band and draw back into it
        let mut mover = MockMover::new(Position::new(40, 60), STEP);
        mover.max_x_mm = 20;

        let report = line_horizontal(&mut mover, -5).unwrap();

        assert_eq!(report, TrajReport { num_moves: 5, num_unreachable: 2 });
        assert_eq!(
            mover.calls.iter().map(|p| p.x_mm).collect::<Vec<_>>(),
            vec![32, 24, 16, 8, 0]
        );
        assert_eq!(mover.position, Position::new(0, 60));
    }

    #[test]
    fn test_line_stalls_at_edge_of_reach() {
        let mut rig = TestRig::new(Params::default());
        rig.ctrl.move_to(Position::new(176, 20)).unwrap();

        let report = line_horizontal(&mut rig.ctrl, 5).unwrap();

        // 184, 192 and 200 are in reach, 208 and 216 are not
        assert_eq!(report, TrajReport { num_moves: 5, num_unreachable: 2 });
        assert_eq!(rig.ctrl.position(), Position::new(200, 20));
        assert_eq!(rig.feedback.failures(), 2);
        assert_eq!(rig.delay.calls(), 6);
    }
}
