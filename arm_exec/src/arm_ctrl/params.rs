//! Parameters for the ArmCtrl module

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control parameters.
///
/// Defaults match the values baked into the gripper firmware's expectations
/// and are overridden by `arm_ctrl.toml`.
#[derive(Deserialize, Clone, Copy)]
pub struct Params {
    /// Minimum commanded angle for all continuous joints.
    ///
    /// Units: degrees
    pub min_angle_deg: i16,

    /// Maximum commanded angle for all continuous joints.
    ///
    /// Units: degrees
    pub max_angle_deg: i16,

    /// Angle step applied per cycle when a gesture commands motion on an
    /// axis.
    ///
    /// Units: degrees/cycle
    pub move_speed_deg: i16,

    /// Half-width of the central resting region of the image. While the
    /// wrist (base) or index fingertip (shoulder) sits inside this region no
    /// motion is commanded on that axis.
    ///
    /// Units: normalised image coordinates
    pub deadzone: f64,

    /// Middle fingertip height relative to the wrist beyond which the elbow
    /// is commanded to move.
    ///
    /// Units: normalised image coordinates
    pub elbow_threshold: f64,

    /// Index-to-thumb fingertip distance below which the gripper closes.
    ///
    /// Units: normalised image coordinates
    pub pinch_threshold: f64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            min_angle_deg: 0,
            max_angle_deg: 180,
            move_speed_deg: 2,
            deadzone: 0.1,
            elbow_threshold: 0.1,
            pinch_threshold: 0.05,
        }
    }
}
