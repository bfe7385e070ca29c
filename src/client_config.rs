//! Public, transport-agnostic client configuration.
//!
//! This type intentionally contains no WebSocket-library concepts. The
//! endpoint fields are for whoever opens the connection: the caller
//! builds its [`Transport`](crate::Transport) from [`ClientConfig::url`].
//! The client only reads the endpoint to name the connection in its logs.

use std::time::Duration;

/// Default control-surface host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default control-surface port.
pub const DEFAULT_PORT: u16 = 3818;

/// What `request` does when another request is still awaiting its reply.
///
/// Only one request can be outstanding on a connection because replies are
/// matched by node and address alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Wait in FIFO order until the earlier request resolves.
    #[default]
    Queue,

    /// Fail immediately with [`Error::RequestInFlight`](crate::Error::RequestInFlight).
    Reject,
}

/// Client configuration and connection parameters.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // ---
    /// Host of the WebSockets surface.
    ///
    /// Not used to connect; the transport is supplied already connected.
    pub host: String,

    /// Port of the WebSockets surface.
    pub port: u16,

    /// How long a request waits for its reply.
    ///
    /// `None` waits until the reply arrives or the connection closes.
    ///
    /// Default: 30 seconds
    pub request_timeout: Option<Duration>,

    /// Buffer size of the push-notification channel.
    ///
    /// Subscribers that fall further behind than this miss the oldest
    /// notifications.
    ///
    /// Default: 256
    pub push_capacity: usize,

    /// Handling of overlapping `request` calls.
    pub overlap_policy: OverlapPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        // ---
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout: Some(Duration::from_secs(30)),
            push_capacity: 256,
            overlap_policy: OverlapPolicy::Queue,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given surface endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// WebSocket URL of the surface, for opening the transport.
    ///
    /// ```
    /// use ardour_surface_rpc::ClientConfig;
    ///
    /// assert_eq!(ClientConfig::new("mixer.local", 3819).url(), "ws://mixer.local:3819");
    /// ```
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }

    /// Set the reply timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Wait for replies without a time limit.
    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }

    /// Set the push-notification buffer size.
    pub fn with_push_capacity(mut self, capacity: usize) -> Self {
        self.push_capacity = capacity;
        self
    }

    /// Set the overlapping-request policy.
    ///
    /// # Example
    ///
    /// ```
    /// use ardour_surface_rpc::{ClientConfig, OverlapPolicy};
    ///
    /// let config = ClientConfig::default().with_overlap_policy(OverlapPolicy::Reject);
    /// assert_eq!(config.overlap_policy, OverlapPolicy::Reject);
    /// ```
    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_defaults() {
        // ---
        let config = ClientConfig::default();
        assert_eq!(config.url(), "ws://127.0.0.1:3818");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.overlap_policy, OverlapPolicy::Queue);
    }

    #[test]
    fn test_builder() {
        // ---
        let config = ClientConfig::new("mixer.local", 9000)
            .without_request_timeout()
            .with_push_capacity(8);

        assert_eq!(config.url(), "ws://mixer.local:9000");
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.push_capacity, 8);
    }
}
