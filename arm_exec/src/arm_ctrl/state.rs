//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{gesture, Params, NUM_MOVE_AXES};
use comms_if::eqpt::{arm::JointState, pose::HandObservation};
use util::{maths::clamp, module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control module state
#[derive(Default)]
pub struct ArmCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    /// The joint state carried between cycles. Deltas accumulate into this,
    /// so the arm holds position whenever no motion is commanded.
    pub(crate) joint_state: JointState,
}

/// Input data to Arm Control.
///
/// Quit is not carried here: it ends the session rather than one cycle's
/// processing, so the outer loop handles it directly via
/// `DataStore::quit_requested`, after this cycle's output has been emitted.
#[derive(Default)]
pub struct ControlFrame {
    /// The hand observation to act on, or `None` if no hand was seen this
    /// cycle.
    pub observation: Option<HandObservation>,

    /// True if the user requested a joint state reset this cycle.
    ///
    /// Reset takes priority over any observation in the same frame.
    pub reset: bool,
}

/// Status report for ArmCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Per-axis flags raised when a commanded angle was clamped to the
    /// actuator limits, indexed base/shoulder/elbow.
    pub angle_limited: [bool; NUM_MOVE_AXES],

    /// True if the joint state was reset this cycle
    pub reset: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ArmCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = ControlFrame;
    type OutputData = JointState;
    type StatusReport = StatusReport;
    type ProcError = super::ArmCtrlError;

    /// Initialise the ArmCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) -> Result<(), Self::InitError> {
        // Load the parameters
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(e),
        };

        // The joint state defaults to the safe startup position, nothing
        // more to do.

        Ok(())
    }

    /// Perform cyclic processing of Arm Control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the status report
        self.report = StatusReport::default();

        // Reset wins over any observation in the same frame
        if input_data.reset {
            self.joint_state = JointState::default();
            self.report.reset = true;
        } else if let Some(ref obs) = input_data.observation {
            let deltas = gesture::interpret(obs, &self.params)?;

            self.joint_state.base_deg += deltas.angle_delta_deg[gesture::BASE_AXIS_IDX];
            self.joint_state.shoulder_deg += deltas.angle_delta_deg[gesture::SHOULDER_AXIS_IDX];
            self.joint_state.elbow_deg += deltas.angle_delta_deg[gesture::ELBOW_AXIS_IDX];
            self.joint_state.gripper = deltas.gripper;
        }
        // No observation: zero deltas, the gripper holds its last state

        // Limit to the actuator capabilities. Runs every cycle regardless of
        // the input so an out-of-range state can never persist.
        self.enforce_limits();

        trace!(
            "ArmCtrl output: B{} S{} E{} G{:?}",
            self.joint_state.base_deg,
            self.joint_state.shoulder_deg,
            self.joint_state.elbow_deg,
            self.joint_state.gripper
        );

        Ok((self.joint_state, self.report))
    }
}

impl ArmCtrl {
    /// Enforce the limits of the manipulator's hardware capabilities.
    ///
    /// Clamps each continuous joint angle into the actuator range. If a limit
    /// is reached the corresponding flag in the status report is raised.
    fn enforce_limits(&mut self) {
        self.report.angle_limited = [
            clamp_axis(&mut self.joint_state.base_deg, &self.params),
            clamp_axis(&mut self.joint_state.shoulder_deg, &self.params),
            clamp_axis(&mut self.joint_state.elbow_deg, &self.params),
        ];
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Clamp one joint angle into the actuator range, returning true if it was
/// limited.
fn clamp_axis(angle: &mut i16, params: &Params) -> bool {
    let clamped = clamp(*angle, params.min_angle_deg, params.max_angle_deg);

    if clamped != *angle {
        *angle = clamped;
        true
    } else {
        false
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::{arm::GripperState, pose::Landmark};

    /// Build an ArmCtrl with default parameters, skipping file-based init.
    fn arm_ctrl() -> ArmCtrl {
        ArmCtrl {
            params: Params::default(),
            ..Default::default()
        }
    }

    fn obs_at(wrist_x: f64) -> HandObservation {
        HandObservation {
            wrist: Landmark { x: wrist_x, y: 0.5 },
            index_tip: Landmark { x: wrist_x, y: 0.5 },
            thumb_tip: Landmark { x: wrist_x + 0.4, y: 0.5 },
            middle_tip: Landmark { x: wrist_x, y: 0.5 },
        }
    }

    #[test]
    fn test_one_cycle_packet() {
        let mut ctrl = arm_ctrl();

        // Hand right of the resting zone, level, pinch wide open: only the
        // base moves and the gripper opens
        let (output, _) = ctrl
            .proc(&ControlFrame {
                observation: Some(HandObservation {
                    wrist: Landmark { x: 0.8, y: 0.5 },
                    index_tip: Landmark { x: 0.8, y: 0.5 },
                    thumb_tip: Landmark { x: 0.6, y: 0.5 },
                    middle_tip: Landmark { x: 0.8, y: 0.5 },
                }),
                reset: false,
            })
            .unwrap();

        assert_eq!(output.to_packet(), b"B92S90E90G180\n".to_vec());
    }

    #[test]
    fn test_deltas_accumulate() {
        let mut ctrl = arm_ctrl();

        // Hand to the right of the resting zone for three cycles
        for _ in 0..3 {
            ctrl.proc(&ControlFrame {
                observation: Some(obs_at(0.8)),
                reset: false,
            })
            .unwrap();
        }

        assert_eq!(ctrl.joint_state.base_deg, 96);
        assert_eq!(ctrl.joint_state.shoulder_deg, 90);
    }

    #[test]
    fn test_no_observation_holds_state() {
        let mut ctrl = arm_ctrl();

        // Close the gripper and move the base
        ctrl.proc(&ControlFrame {
            observation: Some(HandObservation {
                thumb_tip: Landmark { x: 0.81, y: 0.5 },
                ..obs_at(0.8)
            }),
            reset: false,
        })
        .unwrap();

        let before = ctrl.joint_state;
        assert_eq!(before.gripper, GripperState::Closed);

        // A frame with no hand must leave everything untouched
        let (output, _) = ctrl.proc(&ControlFrame::default()).unwrap();

        assert_eq!(output, before);
    }

    #[test]
    fn test_reset_wins_over_observation() {
        let mut ctrl = arm_ctrl();

        ctrl.proc(&ControlFrame {
            observation: Some(obs_at(0.8)),
            reset: false,
        })
        .unwrap();
        assert_ne!(ctrl.joint_state, JointState::default());

        // Reset and an observation in the same frame: the observation is
        // ignored
        let (output, report) = ctrl
            .proc(&ControlFrame {
                observation: Some(obs_at(0.8)),
                reset: true,
            })
            .unwrap();

        assert_eq!(output, JointState::default());
        assert!(report.reset);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut ctrl = arm_ctrl();

        for _ in 0..2 {
            let (output, report) = ctrl
                .proc(&ControlFrame {
                    observation: None,
                    reset: true,
                })
                .unwrap();

            assert_eq!(output, JointState::default());
            assert!(report.reset);
        }
    }

    #[test]
    fn test_limits_saturate() {
        let mut ctrl = arm_ctrl();

        // 90 / 2 = 45 cycles to reach the upper limit, run plenty more
        for _ in 0..60 {
            ctrl.proc(&ControlFrame {
                observation: Some(obs_at(0.8)),
                reset: false,
            })
            .unwrap();
        }

        let (output, report) = ctrl
            .proc(&ControlFrame {
                observation: Some(obs_at(0.8)),
                reset: false,
            })
            .unwrap();

        assert_eq!(output.base_deg, 180);
        assert!(report.angle_limited[gesture::BASE_AXIS_IDX]);

        // And back down to the lower limit
        for _ in 0..120 {
            ctrl.proc(&ControlFrame {
                observation: Some(obs_at(0.2)),
                reset: false,
            })
            .unwrap();
        }

        assert_eq!(ctrl.joint_state.base_deg, 0);
    }

    #[test]
    fn test_invalid_observation_errors() {
        let mut ctrl = arm_ctrl();

        let mut obs = obs_at(0.8);
        obs.index_tip.y = f64::INFINITY;

        let result = ctrl.proc(&ControlFrame {
            observation: Some(obs),
            reset: false,
        });

        assert!(result.is_err());

        // The joint state must be untouched by the failed cycle
        assert_eq!(ctrl.joint_state, JointState::default());
    }
}
