//! # Communications interface crate.
//!
//! Provides the wire types shared between the pose estimator process, the arm
//! executable and the manipulator firmware.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Joint state and observation definitions for equipment
pub mod eqpt;

/// Network module
pub mod net;
