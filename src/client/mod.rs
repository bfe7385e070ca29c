// src/client/mod.rs
//! Control-surface client implementation.
//!
//! This module contains the core [`ArdourClient`] type, which sends commands
//! and queries to the mixing server and pairs each query with its reply.
//!
//! # Architecture
//!
//! The client subscribes to the transport's inbound frame stream and runs a
//! background receive loop that feeds every frame, in arrival order, to
//! [`ArdourClient::on_inbound`].
//!
//! The server answers a query by sending a message for the same node and
//! address, and it also sends such messages on its own whenever state
//! changes. A reply therefore carries no request identifier: it is matched
//! by its [`CorrelationKey`](crate::CorrelationKey) alone. Because of that, only one query can be
//! awaiting a reply at any time. The key of that query and the oneshot
//! channel that delivers its reply live together in a single pending slot.
//!
//! Inbound messages that do not match the outstanding key are broadcast to
//! push subscribers (see [`ArdourClient::subscribe`]).
//!
//! # Concurrency
//!
//! Queries are serialized through a fair request gate according to the
//! configured [`OverlapPolicy`]. The pending slot sits behind a short
//! mutex that is never held across an `.await`.

mod pending;
mod surface;

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, Weak};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;

use crate::protocol::{decode, encode};
use crate::{
    // ---
    log_debug,
    log_error,
    log_info,
    log_trace,
    log_warn,
    Address,
    ClientConfig,
    Error,
    FrameInbox,
    Message,
    Node,
    OverlapPolicy,
    Result,
    TransportPtr,
    TypedValue,
    ValueList,
};

use pending::{PendingSlot, Routed, Ticket};

/// Acquire a mutex guard, intentionally ignoring poisoning.
///
/// The protected state is the single pending slot. Every mutation of it is
/// a single `Option` swap, so a panic in another task cannot leave it
/// half-updated.
///
/// This avoids propagating non-`Send` poison errors across async boundaries.
fn lock_ignore_poison<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // ---
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Item delivered to push subscribers.
#[derive(Debug, Clone)]
pub enum Notification {
    /// Inbound message that was not a reply to the outstanding request.
    Message(Message),

    /// Inbound frame that could not be decoded.
    ///
    /// The connection stays open; the frame is reported and skipped.
    Malformed {
        /// Raw frame text.
        frame: String,
        /// Decoder error.
        reason: String,
    },
}

/// Running control-surface client.
///
/// Cheap to clone (internally `Arc`-backed).
#[derive(Clone)]
pub struct ArdourClient {
    inner: Arc<Inner>,
}

struct Inner {
    // ---
    transport: TransportPtr,
    config: ClientConfig,
    pending: Mutex<PendingSlot>,

    /// Serializes `request` calls. Tokio's mutex is fair, so waiters are
    /// served in FIFO order.
    request_gate: tokio::sync::Mutex<()>,

    push_tx: broadcast::Sender<Notification>,

    rx_task: OnceLock<JoinHandle<()>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        // ---
        if let Some(task) = self.rx_task.get() {
            task.abort();
        }
    }
}

/// Clears the pending slot when a request stops waiting for any reason.
///
/// Covers timeout, send failure, and the caller dropping the `request`
/// future. The ticket check keeps it from clearing a later request's slot.
struct PendingGuard<'a> {
    pending: &'a Mutex<PendingSlot>,
    ticket: Ticket,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        // ---
        if lock_ignore_poison(self.pending).release(self.ticket) {
            log_debug!("cleared abandoned request (ticket {})", self.ticket);
        }
    }
}

impl ArdourClient {
    // ---
    /// Create a client over an already connected transport.
    ///
    /// Subscribes to the transport's inbound stream and spawns the receive
    /// loop. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the inbound subscription fails.
    pub async fn with_transport(transport: TransportPtr, config: ClientConfig) -> Result<Self> {
        // ---
        let handle = transport.subscribe().await?;

        let (push_tx, _) = broadcast::channel(config.push_capacity.max(1));

        let inner = Arc::new(Inner {
            // ---
            transport,
            config,
            pending: Mutex::new(PendingSlot::new()),
            request_gate: tokio::sync::Mutex::new(()),
            push_tx,
            rx_task: OnceLock::new(),
        });

        // The loop only holds a weak reference so dropping the last client
        // handle shuts it down.
        let rx_task = tokio::spawn(Self::receive_loop(handle, Arc::downgrade(&inner)));
        let _ = inner.rx_task.set(rx_task);

        log_info!("client attached to surface at {}", inner.config.url());
        Ok(Self { inner })
    }

    async fn receive_loop(mut handle: FrameInbox, weak: Weak<Inner>) {
        // ---
        loop {
            match handle.inbox.recv().await {
                Some(frame) => {
                    let Some(inner) = weak.upgrade() else {
                        // Client was dropped, exit loop
                        break;
                    };
                    let client = ArdourClient { inner };
                    if let Err(err) = client.on_inbound(&frame) {
                        log_warn!("skipping inbound frame: {err}");
                        let _ = client.inner.push_tx.send(Notification::Malformed {
                            frame,
                            reason: err.to_string(),
                        });
                    }
                }
                None => {
                    if let Some(inner) = weak.upgrade() {
                        log_info!("connection to {} closed by the server", inner.config.url());
                        ArdourClient { inner }.mark_closed();
                    }
                    break;
                }
            }
        }
    }

    /// Send a message without waiting for a reply.
    ///
    /// Used for commands (setters). Returns the message that was sent.
    ///
    /// # Errors
    ///
    /// - `Error::ConnectionClosed` if the connection is already closed
    /// - `Error::UnrepresentableValue` if a value cannot be encoded
    /// - the transport's error if the write fails
    pub async fn fire(
        &self,
        node: Node,
        addr: impl Into<Address>,
        values: Vec<TypedValue>,
    ) -> Result<Message> {
        // ---
        let msg = Message::new(node, addr, values);
        self.send_message(&msg).await?;
        Ok(msg)
    }

    /// Send a query and wait for the reply with the same node and address.
    ///
    /// Returns the reply's values. Only one query is outstanding at a time;
    /// see [`OverlapPolicy`] for what happens to concurrent calls.
    ///
    /// Dropping the returned future, or hitting the configured timeout,
    /// clears the outstanding key so that a later message for the same node
    /// and address is treated as a push notification.
    ///
    /// # Errors
    ///
    /// - `Error::RequestInFlight` under [`OverlapPolicy::Reject`] if another
    ///   query is still waiting
    /// - `Error::Timeout` if no reply arrives within `request_timeout`
    /// - `Error::ConnectionClosed` if the connection closes first
    /// - any error from [`fire`](Self::fire)
    pub async fn request(
        &self,
        node: Node,
        addr: impl Into<Address>,
        values: Vec<TypedValue>,
    ) -> Result<ValueList> {
        // ---
        let _turn = match self.inner.config.overlap_policy {
            OverlapPolicy::Queue => self.inner.request_gate.lock().await,
            OverlapPolicy::Reject => self
                .inner
                .request_gate
                .try_lock()
                .map_err(|_| Error::RequestInFlight)?,
        };

        let msg = Message::new(node, addr, values);
        let key = msg.correlation_key();

        // Register before writing so a fast reply cannot slip past.
        let (ticket, rx) = lock_ignore_poison(&self.inner.pending).register(key.clone())?;
        let _guard = PendingGuard {
            pending: &self.inner.pending,
            ticket,
        };

        self.send_message(&msg).await?;
        log_debug!("awaiting reply for {key}");

        let reply = match self.inner.config.request_timeout {
            Some(timeout) => time::timeout(timeout, rx)
                .await
                .map_err(|_| Error::Timeout)?,
            None => rx.await,
        }
        .map_err(|_| Error::ConnectionClosed)?;

        Ok(reply.into_values())
    }

    /// Query a node whose reply carries a single value.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProtocolViolation` if the reply has no values, plus
    /// any error from [`request`](Self::request).
    pub async fn request_single(
        &self,
        node: Node,
        addr: impl Into<Address>,
        values: Vec<TypedValue>,
    ) -> Result<TypedValue> {
        // ---
        let addr = addr.into();
        let reply = self.request(node, addr.clone(), values).await?;

        reply
            .into_iter()
            .next()
            .ok_or_else(|| Error::ProtocolViolation(format!("reply to {node}{addr} carried no values")))
    }

    /// Process one inbound frame.
    ///
    /// Called by the receive loop for every frame in arrival order. A
    /// message matching the outstanding request is handed to that request
    /// and not forwarded; anything else goes to push subscribers.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedMessage` or `Error::UnknownNode` if the frame
    /// cannot be decoded. Correlator state is left untouched.
    pub fn on_inbound(&self, raw: &str) -> Result<()> {
        // ---
        log_trace!("<- {raw}");
        let msg = decode(raw)?;

        let routed = lock_ignore_poison(&self.inner.pending).route(msg);

        match routed {
            Routed::Reply(_key) => {
                log_debug!("reply matched {_key}");
            }
            Routed::Push(msg) => {
                // No subscribers is not an error.
                let _ = self.inner.push_tx.send(Notification::Message(msg));
            }
        }

        Ok(())
    }

    /// Subscribe to push notifications.
    ///
    /// Receives every inbound message that was not consumed as a reply,
    /// plus a [`Notification::Malformed`] for each undecodable frame. Only
    /// items arriving after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        // ---
        self.inner.push_tx.subscribe()
    }

    /// True while a query is waiting for its reply.
    pub fn has_pending_request(&self) -> bool {
        // ---
        lock_ignore_poison(&self.inner.pending)
            .outstanding_key()
            .is_some()
    }

    pub fn is_closed(&self) -> bool {
        lock_ignore_poison(&self.inner.pending).is_closed()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Close the connection.
    ///
    /// Any query still waiting is released with `Error::ConnectionClosed`,
    /// as are later calls to `fire` and `request`.
    pub async fn close(&self) -> Result<()> {
        // ---
        log_info!("closing connection to {}", self.inner.config.url());
        self.mark_closed();
        self.inner.transport.close().await
    }

    fn mark_closed(&self) {
        // ---
        if lock_ignore_poison(&self.inner.pending).close() {
            log_debug!("released pending request: connection closed");
        }
    }

    async fn send_message(&self, msg: &Message) -> Result<()> {
        // ---
        if self.is_closed() {
            return Err(Error::ConnectionClosed);
        }

        let frame = encode(msg)?;
        log_trace!("-> {frame}");
        self.inner.transport.send(frame).await.map_err(|err| {
            log_error!("failed to send {} frame: {err}", msg.node());
            err
        })
    }
}
