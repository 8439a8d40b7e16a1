//! Link configuration.

use std::env;

/// Address of the cross controller on the installation network.
pub const DEFAULT_HOST: &str = "192.168.10.10";
pub const DEFAULT_PORT: u16 = 1337;
/// Frames buffered between the game loop and the sender task.
pub const DEFAULT_QUEUE_DEPTH: usize = 4;

/// Where and how frames are streamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub host: String,
    pub port: u16,
    pub queue_depth: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl LinkConfig {
    /// Read `CROSS_HOST`, `CROSS_PORT` and `CROSS_QUEUE_DEPTH`, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("CROSS_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("CROSS_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let queue_depth = env::var("CROSS_QUEUE_DEPTH")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.queue_depth);

        Self {
            host,
            port,
            queue_depth,
        }
    }

    /// `CROSS_LINK_DISABLED=1` (or `true`) turns the link off entirely.
    pub fn is_disabled() -> bool {
        env::var("CROSS_LINK_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `host:port`, suitable for address resolution.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
