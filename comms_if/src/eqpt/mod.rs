//! # Equipment interfaces

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Manipulator joint state and command packet definitions
pub mod arm;

/// Hand pose estimator interface definitions
pub mod pose;
