//! WebSocket transport configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Per-connection transport settings
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    /// Frames queued per connection before deliveries start failing
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,

    /// Seconds between server pings
    #[serde(default = "default_ping_interval")]
    pub ping_interval_secs: u64,

    /// Seconds of silence before a connection is dropped
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl WebSocketConfig {
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.outbound_buffer == 0 {
            return Err(ValidationError::ZeroLimit("websocket.outbound_buffer"));
        }
        if self.ping_interval_secs == 0 {
            return Err(ValidationError::ZeroLimit("websocket.ping_interval_secs"));
        }
        if self.idle_timeout_secs <= self.ping_interval_secs {
            return Err(ValidationError::IdleTimeoutTooShort);
        }
        Ok(())
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: default_outbound_buffer(),
            ping_interval_secs: default_ping_interval(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

fn default_outbound_buffer() -> usize {
    64
}

fn default_ping_interval() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    90
}
