//! Serial transmitter for manipulator command packets.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{error, info};
use std::io::Write;
use std::time::Duration;

// Internal
use crate::params::ArmExecParams;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Timeout on serial writes. Must stay well under the cycle period so a
/// wedged port cannot stall the control loop.
const WRITE_TIMEOUT_MS: u64 = 50;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Transmitter writing command packets to the manipulator's serial port.
///
/// Transmission is best effort: if the port cannot be opened, or a write
/// fails, the failure is reported once and the transmitter disables itself.
/// The control loop keeps running either way, so the operator still gets
/// joint state telemetry without hardware attached.
pub struct SerialTx {
    port: Option<Box<dyn serialport::SerialPort>>,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl SerialTx {
    /// Open the manipulator's serial port.
    ///
    /// Never fails, a transmitter that could not open its port is created
    /// disabled.
    pub fn new(params: &ArmExecParams) -> Self {
        let port = serialport::new(&params.serial_port, params.serial_baud)
            .timeout(Duration::from_millis(WRITE_TIMEOUT_MS))
            .open();

        let port = match port {
            Ok(p) => {
                info!(
                    "Serial port {} open at {} baud",
                    params.serial_port, params.serial_baud
                );
                Some(p)
            }
            Err(e) => {
                error!(
                    "Could not open serial port {}: {}. \
                    Transmission disabled, continuing without hardware",
                    params.serial_port, e
                );
                None
            }
        };

        Self { port }
    }

    /// Send a command packet to the manipulator.
    ///
    /// A write failure is reported once, after which the transmitter is
    /// disabled and all further sends are silently dropped.
    pub fn send(&mut self, packet: &[u8]) {
        if let Some(ref mut port) = self.port {
            if let Err(e) = port.write_all(packet) {
                error!(
                    "Serial write failed: {}. Transmission disabled for the rest of the session",
                    e
                );
                self.port = None;
            }
        }
    }

    /// Return whether the transmitter is still able to send.
    pub fn is_enabled(&self) -> bool {
        self.port.is_some()
    }
}
