//! Request/reply correlation for the Ardour WebSockets control surface.
//!
//! The surface speaks JSON frames of the form
//! `{"node": ..., "addr": [...], "val": [...]}` in both directions. A query
//! is answered with a frame for the same node and address, and the server
//! also sends such frames unprompted whenever mixer state changes. This crate
//! provides the wire codec (including the finite stand-in for ±infinity) and
//! a client that pairs each query with its reply while forwarding every other
//! frame to push subscribers.
//!
//! ```no_run
//! use ardour_surface_rpc::{create_memory_transport, ArdourClient, ClientConfig};
//!
//! # async fn example() -> ardour_surface_rpc::Result<()> {
//! let (transport, _server) = create_memory_transport(16);
//! let client = ArdourClient::with_transport(transport, ClientConfig::default()).await?;
//!
//! client.set_strip_mute(0, true).await?;
//! let bpm = client.tempo().await?;
//! # Ok(())
//! # }
//! ```

// Import all sub modules once...
mod client;
mod domain;
mod protocol;
mod transport;

mod client_config;

mod error;
mod macros;

pub(crate) use macros::{log_debug, log_error, log_info, log_trace, log_warn};

// Re-export main types
pub use client::{ArdourClient, Notification};

pub use client_config::{ClientConfig, OverlapPolicy, DEFAULT_HOST, DEFAULT_PORT};

pub use error::{Error, Result};

pub use protocol::{decode, encode, CorrelationKey, JSON_INFINITY};

pub use transport::{create_memory_transport, MemoryServer};

// --- public re-exports
pub use domain::{
    //
    Address,
    FrameInbox,
    Message,
    Node,
    Transport,
    TransportPtr,
    TypedValue,
    ValueList,
};
