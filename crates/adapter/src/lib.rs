//! Adapter module - streams frames to the physical LED cross over UDP
//!
//! The cross controller listens for UDP datagrams and shows each one as a frame.
//! This module turns quantized engine frames into datagrams and sends them from a
//! background tokio runtime, so the game loop never blocks on the network.
//!
//! # Protocol Overview
//!
//! - **Transport**: one UDP datagram per frame, fire and forget
//! - **Payload**: JSON array of 48 rows, each an array of 48 shade levels (0-7)
//! - **Target**: `192.168.10.10:1337` by default
//!
//! # Environment Variables
//!
//! Configure the link using environment variables:
//!
//! - `CROSS_HOST`: Controller address (default: "192.168.10.10")
//! - `CROSS_PORT`: Controller port (default: 1337)
//! - `CROSS_QUEUE_DEPTH`: Frames buffered before dropping (default: 4)
//! - `CROSS_LINK_DISABLED`: Set to "1" or "true" to disable the link entirely
//!
//! # Implementation
//!
//! - See [`protocol`] for the wire format
//! - See [`link`] for the runtime and the sender task
//!
//! # Testing
//!
//! Listen with netcat and point the link at it:
//!
//! ```bash
//! nc -ul 127.0.0.1 1337
//! CROSS_HOST=127.0.0.1 cross-tetris --link
//! ```

pub mod config;
pub mod link;
pub mod protocol;

pub use cross_tetris_core as core;
pub use cross_tetris_types as types;

pub use config::LinkConfig;
pub use link::{run_link, FrameLink, LinkStats};
pub use protocol::{encode_frame, FrameDatagram};
