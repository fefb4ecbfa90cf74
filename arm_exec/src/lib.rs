//! # Arm executable library
//!
//! Functions and modules used by the arm-side executable.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod arm_ctrl;
pub mod data_store;
pub mod params;
pub mod pose_client;
pub mod serial_tx;
