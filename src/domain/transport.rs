// src/domain/transport.rs

//! Transport domain abstractions.
//!
//! This module defines the interface the client uses to exchange text
//! frames with the control surface. It intentionally avoids any reference
//! to concrete WebSocket libraries or connection management.
//!
//! The transport layer is responsible only for writing outbound frames and
//! delivering inbound frames in arrival order. Message decoding, request
//! correlation, and timeouts are handled by the client.
//!
//! Concrete implementations of this interface live under `src/transport/`.
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::Result;

/// Handle returned from a successful subscription.
///
/// The inbound stream ends (`recv()` returns `None`) when the connection
/// closes. It is not restartable.
pub struct FrameInbox {
    // ---
    /// Receiver channel for inbound text frames, in arrival order.
    pub inbox: mpsc::Receiver<String>,
}

/// Transport abstraction.
///
/// Implementations must ensure that:
/// - Frames are delivered to the inbox in the order they arrived.
/// - `send()` returns an error, rather than hanging, once the connection
///   is gone.
/// - Closing the transport ends every inbox it handed out.
///
/// The in-memory transport serves as the reference implementation of these
/// semantics.
///
/// # Notes
///
/// This trait uses `async_trait`; consumers should treat methods as normal
/// `async fn`s.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    // ---
    /// Write one text frame to the server.
    async fn send(&self, frame: String) -> Result<()>;

    /// Obtain the inbound frame stream.
    async fn subscribe(&self) -> Result<FrameInbox>;

    /// Close the connection and release any associated resources.
    async fn close(&self) -> Result<()>;
}

/// Shared transport pointer.
///
/// This is an `Arc<dyn Transport>`, so `.clone()` only increments a
/// reference count and every clone shares the same connection.
pub type TransportPtr = Arc<dyn Transport>;
