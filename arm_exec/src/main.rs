//! Main arm-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Pose frame acquisition from the estimator
//!         - Arm control processing (gestures to joint state)
//!         - Command packet transmission over serial
//!
//! The loop runs at a fixed rate. Frames with no hand observation produce no
//! motion but still emit a command packet, so the manipulator firmware sees a
//! continuous stream while the executable is alive.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, trace, warn};
use std::thread;
use std::time::{Duration, Instant};

// Internal
use arm_lib::{
    data_store::DataStore, params::ArmExecParams, pose_client::PoseClient, serial_tx::SerialTx,
};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 1.0 / 30.0;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Gesture Arm Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: ArmExecParams =
        util::params::load("arm_exec.toml").wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.arm_ctrl
        .init("arm_ctrl.toml", &session)
        .wrap_err("Failed to initialise ArmCtrl")?;
    info!("ArmCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE EQUIPMENT ----

    info!("Initialising equipment");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let pose_client = PoseClient::new(&zmq_ctx, &exec_params)
        .wrap_err("Failed to initialise the PoseClient")?;
    info!("PoseClient initialised, estimator at {}", exec_params.pose_endpoint);

    let mut serial_tx = SerialTx::new(&exec_params);

    info!("Equipment initialisation complete");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- DATA INPUT ----

        match pose_client.recv_frame() {
            Ok(Some(frame)) => {
                // Log the frame age, a stale stream points at an overloaded
                // estimator
                let frame_age_ms = chrono::Utc::now()
                    .signed_duration_since(frame.timestamp)
                    .num_milliseconds();
                trace!("Pose frame is {} ms old", frame_age_ms);

                // Only one hand drives the arm, additional observations in
                // the frame are ignored
                ds.arm_ctrl_input.observation = frame.observations.first().copied();
                ds.arm_ctrl_input.reset = frame.reset;

                if frame.quit {
                    ds.quit_requested = true;
                }
            }
            // No new frame: the input keeps its defaults and the arm holds
            Ok(None) => (),
            Err(e) => warn!("Could not get pose frame: {}", e),
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        // ArmCtrl processing
        match ds.arm_ctrl.proc(&ds.arm_ctrl_input) {
            Ok((o, r)) => {
                ds.arm_ctrl_output = o;
                ds.arm_ctrl_status_rpt = r;
            }
            Err(e) => {
                // ArmCtrl errors mean a glitched observation, so just issue
                // the warning and continue with the previous output.
                warn!("Error during ArmCtrl processing: {}", e)
            }
        };

        // ---- COMMAND OUTPUT ----

        serial_tx.send(&ds.arm_ctrl_output.to_packet());

        // ---- MONITORING ----

        if ds.is_1_hz_cycle {
            trace!(
                "Cycle {}: output {:?}, estimator connected: {}, serial enabled: {}",
                ds.num_cycles,
                ds.arm_ctrl_output,
                pose_client.is_connected(),
                serial_tx.is_enabled()
            );
        }

        // ---- SESSION CONTROL ----

        // Quit is cooperative: the packet for the final state has already
        // been sent this cycle
        if ds.quit_requested {
            info!("Quit requested, stopping");
            break;
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    // Record the joint state the manipulator was left in
    session.save("final_joint_state.json", ds.arm_ctrl_output);
    session.exit();

    info!("End of execution");

    Ok(())
}
