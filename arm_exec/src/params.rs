//! Parameters for the arm executable

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Executable-level parameters: where the estimator publishes and where the
/// manipulator listens.
#[derive(Deserialize, Clone)]
pub struct ArmExecParams {
    /// Endpoint of the pose estimator's publication socket
    pub pose_endpoint: String,

    /// Path of the manipulator's serial port device
    pub serial_port: String,

    /// Baud rate of the manipulator's serial link
    pub serial_baud: u32,
}
