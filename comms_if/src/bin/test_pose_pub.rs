//! Synthetic pose publisher test
//!
//! Publishes a stream of PoseFrames with the wrist sweeping left and right
//! across the screen, so the arm executable can be driven without a camera
//! or estimator attached.

use chrono::Utc;
use comms_if::{
    eqpt::pose::{HandObservation, Landmark, PoseFrame},
    net::{zmq, MonitoredSocket, SocketOptions},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create zmq context
    let ctx = zmq::Context::new();

    // Create socket options
    let socket_options = SocketOptions {
        bind: true,
        block_on_first_connect: false,
        ..Default::default()
    };

    // Create the socket
    let socket = MonitoredSocket::new(&ctx, zmq::PUB, socket_options, "tcp://*:5030")?;

    println!("Pose publisher open on port 5030");

    let mut t = 0f64;

    loop {
        // Sweep the wrist across the screen, fingertips tracking above it.
        // The pinch stays wide so the gripper remains open.
        let x = 0.5 + 0.4 * (t * 0.5).sin();

        let frame = PoseFrame {
            timestamp: Utc::now(),
            observations: vec![HandObservation {
                wrist: Landmark { x, y: 0.6 },
                index_tip: Landmark { x, y: 0.4 },
                thumb_tip: Landmark { x: x + 0.15, y: 0.4 },
                middle_tip: Landmark { x, y: 0.55 },
            }],
            reset: false,
            quit: false,
        };

        match socket.send(&serde_json::to_string(&frame)?, 0) {
            Ok(_) => (),
            Err(e) => println!("Failed to send frame: {}", e),
        }

        t += 1.0 / 30.0;
        std::thread::sleep(std::time::Duration::from_millis(33));
    }
}
