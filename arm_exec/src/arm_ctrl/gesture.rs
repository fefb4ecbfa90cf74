//! Gesture interpretation rules
//!
//! Maps a single hand observation onto per-axis angle deltas and a gripper
//! demand. The rules are velocity based: an axis moves by a fixed step each
//! cycle for as long as the gesture holds, and holds position when the hand
//! returns to the resting zone.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{ArmCtrlError, Params, NUM_MOVE_AXES};
use comms_if::eqpt::{arm::GripperState, pose::HandObservation};
use util::maths::norm_2d;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Normalised x/y coordinate of the image centre, about which the resting
/// zone is defined.
pub const IMAGE_CENTRE: f64 = 0.5;

/// Index of the base axis in delta arrays
pub const BASE_AXIS_IDX: usize = 0;

/// Index of the shoulder axis in delta arrays
pub const SHOULDER_AXIS_IDX: usize = 1;

/// Index of the elbow axis in delta arrays
pub const ELBOW_AXIS_IDX: usize = 2;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The joint demands produced by one observation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GestureDeltas {
    /// Angle deltas for the continuous axes, indexed base/shoulder/elbow.
    ///
    /// Units: degrees/cycle
    pub angle_delta_deg: [i16; NUM_MOVE_AXES],

    /// Demanded gripper state for this cycle
    pub gripper: GripperState,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Interpret a hand observation as joint demands.
///
/// The rules, all using strict comparisons so that a landmark sitting exactly
/// on a boundary commands no motion:
///     1. Base follows the wrist left/right of the resting zone.
///     2. Shoulder follows the index fingertip above/below the resting zone
///        (screen y runs downwards, so a high fingertip raises the shoulder).
///     3. Elbow follows the middle fingertip relative to the wrist, allowing
///        independent elbow control by tilting the hand.
///     4. Gripper closes while the index and thumb tips are pinched together.
///
/// The gripper rule has no hysteresis: a pinch distance hovering around the
/// threshold will chatter between open and closed.
pub fn interpret(
    obs: &HandObservation,
    params: &Params,
) -> Result<GestureDeltas, ArmCtrlError> {
    // Observations with non-finite coordinates would poison the comparisons
    // below, reject them outright.
    if !obs.is_finite() {
        return Err(ArmCtrlError::InvalidObservation);
    }

    let mut deltas = [0i16; NUM_MOVE_AXES];

    // Base (left/right) from the wrist position
    if obs.wrist.x > IMAGE_CENTRE + params.deadzone {
        deltas[BASE_AXIS_IDX] = params.move_speed_deg;
    } else if obs.wrist.x < IMAGE_CENTRE - params.deadzone {
        deltas[BASE_AXIS_IDX] = -params.move_speed_deg;
    }

    // Shoulder (up/down) from the index fingertip height
    if obs.index_tip.y < IMAGE_CENTRE - params.deadzone {
        deltas[SHOULDER_AXIS_IDX] = params.move_speed_deg;
    } else if obs.index_tip.y > IMAGE_CENTRE + params.deadzone {
        deltas[SHOULDER_AXIS_IDX] = -params.move_speed_deg;
    }

    // Elbow from the middle fingertip height relative to the wrist
    if obs.middle_tip.y < obs.wrist.y - params.elbow_threshold {
        deltas[ELBOW_AXIS_IDX] = params.move_speed_deg;
    } else if obs.middle_tip.y > obs.wrist.y + params.elbow_threshold {
        deltas[ELBOW_AXIS_IDX] = -params.move_speed_deg;
    }

    // Gripper from the index-thumb pinch distance. Absolute rather than
    // velocity control.
    let pinch_dist = norm_2d(
        [obs.index_tip.x, obs.index_tip.y],
        [obs.thumb_tip.x, obs.thumb_tip.y],
    );

    let gripper = if pinch_dist < params.pinch_threshold {
        GripperState::Closed
    } else {
        GripperState::Open
    };

    Ok(GestureDeltas {
        angle_delta_deg: deltas,
        gripper,
    })
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::pose::Landmark;

    /// An observation with every landmark at the image centre and the pinch
    /// wide open.
    fn resting_obs() -> HandObservation {
        HandObservation {
            wrist: Landmark { x: 0.5, y: 0.5 },
            index_tip: Landmark { x: 0.5, y: 0.5 },
            thumb_tip: Landmark { x: 0.9, y: 0.5 },
            middle_tip: Landmark { x: 0.5, y: 0.5 },
        }
    }

    #[test]
    fn test_resting_zone_holds() {
        let deltas = interpret(&resting_obs(), &Params::default()).unwrap();

        assert_eq!(deltas.angle_delta_deg, [0, 0, 0]);
        assert_eq!(deltas.gripper, GripperState::Open);
    }

    #[test]
    fn test_base_follows_wrist() {
        let params = Params::default();

        let mut obs = resting_obs();
        obs.wrist.x = 0.7;
        assert_eq!(
            interpret(&obs, &params).unwrap().angle_delta_deg[BASE_AXIS_IDX],
            params.move_speed_deg
        );

        obs.wrist.x = 0.3;
        assert_eq!(
            interpret(&obs, &params).unwrap().angle_delta_deg[BASE_AXIS_IDX],
            -params.move_speed_deg
        );
    }

    #[test]
    fn test_shoulder_follows_index_tip() {
        let params = Params::default();

        // Screen y runs downwards, a high fingertip has small y
        let mut obs = resting_obs();
        obs.index_tip.y = 0.2;
        assert_eq!(
            interpret(&obs, &params).unwrap().angle_delta_deg[SHOULDER_AXIS_IDX],
            params.move_speed_deg
        );

        obs.index_tip.y = 0.8;
        assert_eq!(
            interpret(&obs, &params).unwrap().angle_delta_deg[SHOULDER_AXIS_IDX],
            -params.move_speed_deg
        );
    }

    #[test]
    fn test_elbow_is_wrist_relative() {
        let params = Params::default();

        // Whole hand low in the image but middle tip well above the wrist,
        // only the elbow should move up
        let mut obs = resting_obs();
        obs.wrist.y = 0.8;
        obs.index_tip.y = 0.8;
        obs.middle_tip.y = 0.6;

        let deltas = interpret(&obs, &params).unwrap();
        assert_eq!(deltas.angle_delta_deg[ELBOW_AXIS_IDX], params.move_speed_deg);
        assert_eq!(deltas.angle_delta_deg[SHOULDER_AXIS_IDX], -params.move_speed_deg);

        obs.middle_tip.y = 0.95;
        assert_eq!(
            interpret(&obs, &params).unwrap().angle_delta_deg[ELBOW_AXIS_IDX],
            -params.move_speed_deg
        );
    }

    #[test]
    fn test_boundaries_are_strict() {
        let params = Params::default();

        // Landmarks sitting exactly on each upper boundary command no motion
        let mut obs = resting_obs();
        obs.wrist.x = 0.5 + params.deadzone;
        obs.index_tip.y = 0.5 - params.deadzone;
        obs.middle_tip.y = obs.wrist.y - params.elbow_threshold;

        assert_eq!(
            interpret(&obs, &params).unwrap().angle_delta_deg,
            [0, 0, 0]
        );

        // Same for the mirror boundaries on the other side of each band
        let mut obs = resting_obs();
        obs.wrist.x = 0.5 - params.deadzone;
        obs.index_tip.y = 0.5 + params.deadzone;
        obs.middle_tip.y = obs.wrist.y + params.elbow_threshold;

        assert_eq!(
            interpret(&obs, &params).unwrap().angle_delta_deg,
            [0, 0, 0]
        );

        // A pinch distance exactly on the threshold leaves the gripper open
        let mut obs = resting_obs();
        obs.thumb_tip = Landmark {
            x: obs.index_tip.x + params.pinch_threshold,
            y: obs.index_tip.y,
        };
        assert_eq!(interpret(&obs, &params).unwrap().gripper, GripperState::Open);
    }

    #[test]
    fn test_pinch_closes_gripper() {
        let mut obs = resting_obs();
        obs.thumb_tip = Landmark { x: 0.51, y: 0.5 };

        let deltas = interpret(&obs, &Params::default()).unwrap();
        assert_eq!(deltas.gripper, GripperState::Closed);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut obs = resting_obs();
        obs.wrist.x = f64::NAN;

        assert!(matches!(
            interpret(&obs, &Params::default()),
            Err(ArmCtrlError::InvalidObservation)
        ));
    }
}
