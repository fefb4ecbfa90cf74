//! # Manipulator Joint State and Command Packet
//!
//! The manipulator is a 4-DOF arm: base rotation, shoulder, elbow, and a
//! binary gripper. The receiving firmware accepts one ASCII command packet
//! per frame on its serial input.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// State of the gripper actuator.
///
/// The gripper shares the servo angle type on the wire but is driven as a
/// binary actuator: fully closed (0 degrees) or fully open (180 degrees).
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub enum GripperState {
    Closed,
    Open,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The commanded angles of all four manipulator joints.
///
/// The continuous joints (`base_deg`, `shoulder_deg`, `elbow_deg`) must be
/// kept within the actuator limits by whoever mutates the state - the packet
/// encoder performs no clamping of its own.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct JointState {
    /// Base rotation angle. Units: degrees
    pub base_deg: i16,

    /// Shoulder angle. Units: degrees
    pub shoulder_deg: i16,

    /// Elbow angle. Units: degrees
    pub elbow_deg: i16,

    /// Gripper state (binary actuator)
    pub gripper: GripperState,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl GripperState {
    /// Angle the firmware drives the gripper servo to for this state.
    pub fn angle_deg(&self) -> i16 {
        match self {
            GripperState::Closed => 0,
            GripperState::Open => 180,
        }
    }
}

impl Default for GripperState {
    fn default() -> Self {
        GripperState::Closed
    }
}

impl JointState {
    /// Encode the joint state into the firmware's command packet.
    ///
    /// Format: `B<base>S<shoulder>E<elbow>G<gripper>\n`, angles as ASCII
    /// decimal integers, gripper as 0 or 180.
    pub fn to_packet(&self) -> Vec<u8> {
        format!(
            "B{}S{}E{}G{}\n",
            self.base_deg,
            self.shoulder_deg,
            self.elbow_deg,
            self.gripper.angle_deg()
        )
        .into_bytes()
    }
}

impl Default for JointState {
    /// The safe startup position: all continuous joints centred, gripper
    /// closed.
    fn default() -> Self {
        JointState {
            base_deg: 90,
            shoulder_deg: 90,
            elbow_deg: 90,
            gripper: GripperState::Closed,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_packet_encoding() {
        let state = JointState {
            base_deg: 92,
            shoulder_deg: 88,
            elbow_deg: 45,
            gripper: GripperState::Open,
        };

        assert_eq!(state.to_packet(), b"B92S88E45G180\n".to_vec());
    }

    #[test]
    fn test_default_packet() {
        assert_eq!(JointState::default().to_packet(), b"B90S90E90G0\n".to_vec());
    }

    #[test]
    fn test_packet_field_order() {
        // All four fields present, in order, single trailing newline
        let packet = String::from_utf8(JointState::default().to_packet()).unwrap();

        let b = packet.find('B').unwrap();
        let s = packet.find('S').unwrap();
        let e = packet.find('E').unwrap();
        let g = packet.find('G').unwrap();

        assert!(b < s && s < e && e < g);
        assert!(packet.ends_with('\n'));
        assert_eq!(packet.matches('\n').count(), 1);
    }
}
