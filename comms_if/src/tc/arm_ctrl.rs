//! # Arm control telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command that can be completed by arm control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmCmd {
    /// Move directly to the home point.
    Home,

    /// Draw a line of the configured length in a compass direction.
    Line(Compass),
}

/// The eight drawing directions.
///
/// The arm base sits at the top of the drawing area, so `South` moves away
/// from the base (+y) and `East` moves to +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ArmCmd {
    /// Decode a single input byte.
    ///
    /// | Byte | Command            |
    /// |------|--------------------|
    /// | `0`  | `Home`             |
    /// | `1`  | `Line(NorthWest)`  |
    /// | `2`  | `Line(North)`      |
    /// | `3`  | `Line(NorthEast)`  |
    /// | `4`  | `Line(West)`       |
    /// | `5`  | `Line(East)`       |
    /// | `6`  | `Line(South)`      |
    /// | `7`  | `Line(SouthWest)`  |
    /// | `8`  | `Line(SouthEast)`  |
    ///
    /// Any other byte returns `None`.
    pub fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'0' => Some(ArmCmd::Home),
            b'1' => Some(ArmCmd::Line(Compass::NorthWest)),
            b'2' => Some(ArmCmd::Line(Compass::North)),
            b'3' => Some(ArmCmd::Line(Compass::NorthEast)),
            b'4' => Some(ArmCmd::Line(Compass::West)),
            b'5' => Some(ArmCmd::Line(Compass::East)),
            b'6' => Some(ArmCmd::Line(Compass::South)),
            b'7' => Some(ArmCmd::Line(Compass::SouthWest)),
            b'8' => Some(ArmCmd::Line(Compass::SouthEast)),
            _ => None,
        }
    }

    /// The input byte which decodes to this command.
    pub fn symbol(&self) -> u8 {
        match self {
            ArmCmd::Home => b'0',
            ArmCmd::Line(Compass::NorthWest) => b'1',
            ArmCmd::Line(Compass::North) => b'2',
            ArmCmd::Line(Compass::NorthEast) => b'3',
            ArmCmd::Line(Compass::West) => b'4',
            ArmCmd::Line(Compass::East) => b'5',
            ArmCmd::Line(Compass::South) => b'6',
            ArmCmd::Line(Compass::SouthWest) => b'7',
            ArmCmd::Line(Compass::SouthEast) => b'8',
        }
    }
}

impl Compass {
    /// Unit direction `(x, y)` of this heading, each component in `{-1, 0, 1}`.
    pub fn unit(&self) -> (i32, i32) {
        match self {
            Compass::North => (0, -1),
            Compass::NorthEast => (1, -1),
            Compass::East => (1, 0),
            Compass::SouthEast => (1, 1),
            Compass::South => (0, 1),
            Compass::SouthWest => (-1, 1),
            Compass::West => (-1, 0),
            Compass::NorthWest => (-1, -1),
        }
    }

    /// True for the four headings which move both axes.
    pub fn is_diagonal(&self) -> bool {
        let (x, y) = self.unit();
        x != 0 && y != 0
    }
}
