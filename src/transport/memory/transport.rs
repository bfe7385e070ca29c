// src/transport/memory/transport.rs

//! In-memory transport implementation.
//!
//! This file contains the concrete implementation of the domain-level
//! `Transport` trait using in-process channels only, plus the
//! [`MemoryServer`] handle that plays the mixing server's side of the link.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use crate::protocol::encode;
use crate::{
    // ---
    log_debug,
    Error,
    FrameInbox,
    Message,
    Result,
    Transport,
    TransportPtr,
};

/// Both directions of one in-process connection.
///
/// Dropping a sender ends the matching receiver's stream, which is how
/// either side observes the connection closing. The locks are only held
/// to clone or take a sender, never across an `.await`, so `shutdown` can
/// also run from `Drop`.
struct Link {
    // ---
    to_client: Mutex<Option<mpsc::Sender<String>>>,
    to_server: Mutex<Option<mpsc::Sender<String>>>,
}

fn lock_sender(
    m: &Mutex<Option<mpsc::Sender<String>>>,
) -> MutexGuard<'_, Option<mpsc::Sender<String>>> {
    // ---
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl Link {
    // ---

    fn sender_to_client(&self) -> Option<mpsc::Sender<String>> {
        lock_sender(&self.to_client).clone()
    }

    fn sender_to_server(&self) -> Option<mpsc::Sender<String>> {
        lock_sender(&self.to_server).clone()
    }

    /// Take both senders. Returns true if the link was still up.
    fn shutdown(&self) -> bool {
        // ---
        let client_side = lock_sender(&self.to_client).take();
        let server_side = lock_sender(&self.to_server).take();
        client_side.is_some() || server_side.is_some()
    }
}

/// In-memory transport.
///
/// ## Semantics
///
/// - Frames are delivered in the order they were written.
/// - The inbound stream can be subscribed exactly once.
/// - Closing either side, or dropping the [`MemoryServer`], ends the
///   client's inbound stream and makes further writes fail with
///   [`Error::ConnectionClosed`].
///
/// ## Non-Goals
///
/// - Network behavior or failure simulation
/// - WebSocket framing
struct MemoryTransport {
    // ---
    link: Arc<Link>,
    inbound: tokio::sync::Mutex<Option<mpsc::Receiver<String>>>,
}

#[async_trait::async_trait]
impl Transport for MemoryTransport {
    // ---

    async fn send(&self, frame: String) -> Result<()> {
        // ---
        let tx = self.link.sender_to_server().ok_or(Error::ConnectionClosed)?;

        tx.send(frame)
            .await
            .map_err(|_| Error::Transport("memory server dropped".into()))
    }

    async fn subscribe(&self) -> Result<FrameInbox> {
        // ---
        let inbox = self
            .inbound
            .lock()
            .await
            .take()
            .ok_or_else(|| Error::Transport("inbound stream already subscribed".into()))?;

        Ok(FrameInbox { inbox })
    }

    async fn close(&self) -> Result<()> {
        // ---
        log_debug!("memory transport closed by client");
        self.link.shutdown();
        Ok(())
    }
}

/// Server side of an in-memory connection.
///
/// Receives the frames the client writes and injects frames (replies or
/// push notifications) into the client's inbound stream.
pub struct MemoryServer {
    // ---
    link: Arc<Link>,
    from_client: mpsc::Receiver<String>,
}

impl MemoryServer {
    // ---

    /// Next frame written by the client, or `None` once the client closed.
    pub async fn recv(&mut self) -> Option<String> {
        // ---
        self.from_client.recv().await
    }

    /// Inject a raw frame into the client's inbound stream.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConnectionClosed` if the link has been shut down.
    pub async fn push(&self, frame: impl Into<String>) -> Result<()> {
        // ---
        let tx = self.link.sender_to_client().ok_or(Error::ConnectionClosed)?;

        tx.send(frame.into())
            .await
            .map_err(|_| Error::ConnectionClosed)
    }

    /// Encode a message and inject it into the client's inbound stream.
    pub async fn push_message(&self, msg: &Message) -> Result<()> {
        // ---
        self.push(encode(msg)?).await
    }

    /// Drop the connection from the server side.
    ///
    /// Dropping the `MemoryServer` has the same effect.
    pub fn disconnect(&self) {
        // ---
        if self.link.shutdown() {
            log_debug!("memory transport closed by server");
        }
    }
}

impl Drop for MemoryServer {
    fn drop(&mut self) {
        // ---
        self.disconnect();
    }
}

/// Create a connected in-memory transport and its server handle.
///
/// `capacity` bounds the number of unread frames in each direction.
pub fn create_transport(capacity: usize) -> (TransportPtr, MemoryServer) {
    // ---
    let capacity = capacity.max(1);
    let (to_client, inbound) = mpsc::channel(capacity);
    let (to_server, from_client) = mpsc::channel(capacity);

    let link = Arc::new(Link {
        to_client: Mutex::new(Some(to_client)),
        to_server: Mutex::new(Some(to_server)),
    });

    let transport = MemoryTransport {
        // ---
        link: link.clone(),
        inbound: tokio::sync::Mutex::new(Some(inbound)),
    };

    (Arc::new(transport), MemoryServer { link, from_client })
}
