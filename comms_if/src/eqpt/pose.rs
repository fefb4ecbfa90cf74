//! # Hand Pose Estimator Interface
//!
//! The estimator process tracks a hand in the camera image and publishes one
//! [`PoseFrame`] per processed video frame. The messages are JSON encoded so
//! the estimator (typically a python process) does not need rust-defined
//! types.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single named point on a tracked hand.
///
/// Coordinates are normalised to the frame size: `x, y` in [0, 1], origin at
/// the top left, already mirrored by the estimator for intuitive left/right
/// mapping.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

/// One hand observation: the landmarks the controller consumes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct HandObservation {
    pub wrist: Landmark,
    pub index_tip: Landmark,
    pub thumb_tip: Landmark,
    pub middle_tip: Landmark,
}

/// One frame from the estimator process.
///
/// Carries zero or more hand observations plus the session-control flags
/// forwarded from the estimator's UI (reset and quit keys).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PoseFrame {
    /// Time the video frame was processed by the estimator
    pub timestamp: DateTime<Utc>,

    /// All hands detected in the frame. May be empty.
    #[serde(default)]
    pub observations: Vec<HandObservation>,

    /// True if the user requested a joint state reset this frame
    #[serde(default)]
    pub reset: bool,

    /// True if the user requested the session to end this frame
    #[serde(default)]
    pub quit: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Landmark {
    /// True if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl HandObservation {
    /// True if every landmark coordinate is a finite number.
    ///
    /// Estimator glitches can produce NaN coordinates, which must not reach
    /// the control rules.
    pub fn is_finite(&self) -> bool {
        self.wrist.is_finite()
            && self.index_tip.is_finite()
            && self.thumb_tip.is_finite()
            && self.middle_tip.is_finite()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pose_frame_deserialise() {
        // Minimal message a python estimator would produce - control flags
        // may be omitted entirely
        let json = r#"{
            "timestamp": "2024-01-01T00:00:00Z",
            "observations": [{
                "wrist": {"x": 0.5, "y": 0.6},
                "index_tip": {"x": 0.5, "y": 0.4},
                "thumb_tip": {"x": 0.6, "y": 0.4},
                "middle_tip": {"x": 0.5, "y": 0.45}
            }]
        }"#;

        let frame: PoseFrame = serde_json::from_str(json).unwrap();

        assert_eq!(frame.observations.len(), 1);
        assert_eq!(frame.observations[0].wrist, Landmark { x: 0.5, y: 0.6 });
        assert!(!frame.reset);
        assert!(!frame.quit);
    }

    #[test]
    fn test_is_finite() {
        let mut obs = HandObservation {
            wrist: Landmark { x: 0.5, y: 0.5 },
            index_tip: Landmark { x: 0.5, y: 0.5 },
            thumb_tip: Landmark { x: 0.5, y: 0.5 },
            middle_tip: Landmark { x: 0.5, y: 0.5 },
        };
        assert!(obs.is_finite());

        obs.middle_tip.y = f64::NAN;
        assert!(!obs.is_finite());
    }
}
