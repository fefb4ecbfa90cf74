//! Client for the hand pose estimator's publication stream.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;

// Internal
use crate::params::ArmExecParams;
use comms_if::{
    eqpt::pose::PoseFrame,
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Subscriber to the estimator's pose frame stream.
pub struct PoseClient {
    socket: MonitoredSocket,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoseClientError {
    #[error("Could not create the pose subscription socket: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not recieve a frame from the estimator: {0}")]
    RecvError(zmq::Error),
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl PoseClient {
    /// Connect to the estimator's publication endpoint.
    ///
    /// Does not block waiting for the estimator, the subscription completes
    /// in the background when the estimator comes up.
    pub fn new(ctx: &zmq::Context, params: &ArmExecParams) -> Result<Self, PoseClientError> {
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            connect_timeout: 1000,
            // Non-blocking recv so the control cycle keeps its fixed rate
            // when no frame is available
            recv_timeout: 0,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::SUB, socket_options, &params.pose_endpoint)
            .map_err(PoseClientError::SocketError)?;

        // Subscribe to everything the estimator publishes
        socket
            .set_subscribe(b"")
            .map_err(PoseClientError::RecvError)?;

        Ok(Self { socket })
    }

    /// Get the latest pose frame from the estimator.
    ///
    /// Drains every frame queued since the last call and returns the newest,
    /// so an estimator running faster than the control cycle cannot build a
    /// backlog of ever-staler frames. Frames are drained in arrival order and
    /// the reset/quit flags of drained frames are carried onto the returned
    /// frame, so a control request can never be skipped over.
    ///
    /// Returns `Ok(None)` if no frame has arrived since the last call.
    /// Malformed messages are logged and dropped, a single bad message must
    /// not stop the control cycle.
    pub fn recv_frame(&self) -> Result<Option<PoseFrame>, PoseClientError> {
        let mut latest: Option<PoseFrame> = None;

        loop {
            let msg = match self.socket.recv_string(0) {
                Ok(Ok(s)) => s,
                Ok(Err(_)) => {
                    warn!("Recieved a non-UTF8 message from the estimator, dropping it");
                    continue;
                }
                Err(zmq::Error::EAGAIN) => break,
                Err(e) => return Err(PoseClientError::RecvError(e)),
            };

            match serde_json::from_str(&msg) {
                Ok(frame) => latest = Some(merge_newer(latest.take(), frame)),
                Err(e) => warn!("Could not parse pose frame: {}", e),
            }
        }

        Ok(latest)
    }

    /// Return whether the estimator is connected.
    pub fn is_connected(&self) -> bool {
        self.socket.connected()
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Replace an older frame with a newer one, carrying the older frame's
/// reset/quit flags forward so a request in a drained frame is never lost.
fn merge_newer(older: Option<PoseFrame>, newer: PoseFrame) -> PoseFrame {
    match older {
        Some(old) => PoseFrame {
            reset: old.reset || newer.reset,
            quit: old.quit || newer.quit,
            ..newer
        },
        None => newer,
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use comms_if::eqpt::pose::{HandObservation, Landmark};

    fn frame(wrist_x: f64, reset: bool, quit: bool) -> PoseFrame {
        let landmark = Landmark { x: wrist_x, y: 0.5 };

        PoseFrame {
            timestamp: Utc::now(),
            observations: vec![HandObservation {
                wrist: landmark,
                index_tip: landmark,
                thumb_tip: landmark,
                middle_tip: landmark,
            }],
            reset,
            quit,
        }
    }

    #[test]
    fn test_merge_keeps_newest_observation() {
        let merged = merge_newer(Some(frame(0.2, false, false)), frame(0.8, false, false));

        assert_eq!(merged.observations[0].wrist.x, 0.8);
    }

    #[test]
    fn test_merge_carries_control_flags() {
        // A reset in a drained frame and a quit in the newest both survive
        let merged = merge_newer(Some(frame(0.2, true, false)), frame(0.8, false, true));

        assert!(merged.reset);
        assert!(merged.quit);
        assert_eq!(merged.observations[0].wrist.x, 0.8);
    }

    #[test]
    fn test_merge_without_backlog() {
        let merged = merge_newer(None, frame(0.8, true, false));

        assert!(merged.reset);
        assert!(!merged.quit);
    }
}
