//! # Mechanisms Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const ARM_IDS: [ActId; 2] = [ActId::ArmShoulder, ActId::ArmElbow];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands that are sent from arm control to the servo controller.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MechDems {
    /// The demanded position of an actuator in degrees.
    pub pos_deg: HashMap<ActId, f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of all actuators on the arm
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum ActId {
    ArmShoulder,
    ArmElbow,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl ActId {
    /// All arm actuators, shoulder first.
    pub fn arm_ids() -> &'static [ActId] {
        &ARM_IDS
    }
}

impl MechDems {
    /// Build demands for both joints of the arm.
    pub fn from_joint_angles(shoulder_deg: f64, elbow_deg: f64) -> Self {
        let mut pos_deg = HashMap::new();

        pos_deg.insert(ActId::ArmShoulder, shoulder_deg);
        pos_deg.insert(ActId::ArmElbow, elbow_deg);

        Self { pos_deg }
    }
}
