//! Link runtime integration.
//!
//! Bridges the sync game loop with an async UDP sender. The game loop hands frames
//! over a bounded channel and never waits: when the sender lags, new frames are
//! dropped.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::UdpSocket;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::config::LinkConfig;
use crate::core::QuantizedFrame;
use crate::protocol::encode_frame;

/// Counters shared between the game loop and the sender task.
#[derive(Debug, Default)]
pub struct LinkStats {
    sent: AtomicU64,
    dropped: AtomicU64,
    failed: AtomicU64,
}

impl LinkStats {
    /// Datagrams handed to the socket.
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Frames discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Datagrams the socket refused.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Send every queued datagram to `target` until the channel closes.
pub async fn run_link(
    socket: UdpSocket,
    target: SocketAddr,
    mut rx: mpsc::Receiver<Vec<u8>>,
    stats: Arc<LinkStats>,
) {
    while let Some(datagram) = rx.recv().await {
        match socket.send_to(&datagram, target).await {
            Ok(_) => {
                stats.sent.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                let failed = stats.failed.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(%target, error = %e, failed, "frame send failed");
            }
        }
    }
    debug!(%target, "link channel closed");
}

/// Running link instance.
pub struct FrameLink {
    _rt: Runtime,
    tx: mpsc::Sender<Vec<u8>>,
    target: SocketAddr,
    stats: Arc<LinkStats>,
}

impl FrameLink {
    /// Start the link from environment variables, after `customize` had a chance to
    /// override them (command line flags, tests).
    ///
    /// Returns None if `CROSS_LINK_DISABLED` is set.
    pub fn start_from_env(
        customize: impl FnOnce(LinkConfig) -> LinkConfig,
    ) -> Result<Option<Self>> {
        if LinkConfig::is_disabled() {
            info!("frame link disabled via CROSS_LINK_DISABLED");
            return Ok(None);
        }
        let config = customize(LinkConfig::from_env());
        Self::start(&config)
            .with_context(|| format!("starting frame link to {}", config.target()))
            .map(Some)
    }

    /// Resolve the target, bind a local socket and spawn the sender task.
    pub fn start(config: &LinkConfig) -> Result<Self> {
        let rt = Runtime::new().context("creating link runtime")?;

        let target_str = config.target();
        let (socket, target) = rt.block_on(async {
            let target = tokio::net::lookup_host(target_str.as_str())
                .await
                .with_context(|| format!("resolving {}", target_str))?
                .next()
                .with_context(|| format!("{} resolved to no address", target_str))?;
            let bind_addr = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
            let socket = UdpSocket::bind(bind_addr)
                .await
                .context("binding link socket")?;
            anyhow::Ok((socket, target))
        })?;

        let (tx, rx) = mpsc::channel::<Vec<u8>>(config.queue_depth.max(1));
        let stats = Arc::new(LinkStats::default());
        rt.spawn(run_link(socket, target, rx, Arc::clone(&stats)));
        info!(%target, queue_depth = config.queue_depth, "frame link started");

        Ok(Self {
            _rt: rt,
            tx,
            target,
            stats,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Queue a frame for sending. Returns false when it was dropped.
    pub fn send(&self, frame: &QuantizedFrame) -> bool {
        let datagram = match encode_frame(frame) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "frame encoding failed");
                return false;
            }
        };
        match self.tx.try_send(datagram) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                let dropped = self.stats.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(dropped, "link queue full, frame dropped");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!("link task stopped, frame dropped");
                false
            }
        }
    }
}
