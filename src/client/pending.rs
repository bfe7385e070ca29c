use tokio::sync::oneshot;

use crate::{CorrelationKey, Error, Message, Result};

/// Ticket identifying which `request` call owns the slot.
pub(super) type Ticket = u64;

struct Outstanding {
    key: CorrelationKey,
    ticket: Ticket,
    tx: oneshot::Sender<Message>,
}

/// Outcome of routing one inbound message.
#[derive(Debug)]
pub(super) enum Routed {
    /// Handed to the waiting request registered under this key.
    Reply(CorrelationKey),
    /// Not awaited by anyone; belongs on the push path.
    Push(Message),
}

/// Tracks the single request waiting for its reply.
///
/// Holds at most one correlation key together with the oneshot channel
/// that carries the matching reply to the waiting caller. The key and the
/// channel are stored together, so a key can never be outstanding without
/// someone to receive the reply.
pub(super) struct PendingSlot {
    // ---
    outstanding: Option<Outstanding>,
    next_ticket: Ticket,
    closed: bool,
}

impl PendingSlot {
    // ---

    /// Create an empty slot
    pub fn new() -> Self {
        // ---
        Self {
            outstanding: None,
            next_ticket: 0,
            closed: false,
        }
    }

    /// Register a pending request
    ///
    /// Returns the ticket that owns the slot and a receiver that is
    /// notified when the matching reply arrives.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] once [`close`](Self::close) was called
    /// - [`Error::RequestInFlight`] if the slot is already taken; an existing
    ///   registration is never overwritten
    pub fn register(
        &mut self,
        key: CorrelationKey,
    ) -> Result<(Ticket, oneshot::Receiver<Message>)> {
        // ---
        if self.closed {
            return Err(Error::ConnectionClosed);
        }
        if self.outstanding.is_some() {
            return Err(Error::RequestInFlight);
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let (tx, rx) = oneshot::channel();

        self.outstanding = Some(Outstanding { key, ticket, tx });
        Ok((ticket, rx))
    }

    /// Route an inbound message
    ///
    /// A message whose key matches the outstanding one clears the slot and
    /// is delivered to the waiter. Everything else is returned for the push
    /// path, including a matching reply whose waiter has already gone away.
    pub fn route(&mut self, msg: Message) -> Routed {
        // ---
        let matches = self.outstanding.as_ref().is_some_and(|o| o.key.matches(&msg));

        if !matches {
            return Routed::Push(msg);
        }

        match self.outstanding.take() {
            Some(Outstanding { key, tx, .. }) => match tx.send(msg) {
                Ok(()) => Routed::Reply(key),
                Err(msg) => Routed::Push(msg),
            },
            None => Routed::Push(msg),
        }
    }

    /// Clear the slot if it is still owned by `ticket`
    ///
    /// Used when a request is cancelled, times out, or fails to send.
    /// Returns true if the registration was removed.
    pub fn release(&mut self, ticket: Ticket) -> bool {
        // ---
        if self.outstanding.as_ref().is_some_and(|o| o.ticket == ticket) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    /// Mark the connection closed and drop any registration
    ///
    /// The waiter observes a closed channel and later registrations fail.
    /// Returns true if a request was waiting.
    pub fn close(&mut self) -> bool {
        // ---
        self.closed = true;
        self.outstanding.take().is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Key of the request currently awaiting a reply.
    pub fn outstanding_key(&self) -> Option<&CorrelationKey> {
        // ---
        self.outstanding.as_ref().map(|o| &o.key)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::{Address, Node, TypedValue};

    fn tempo_reply(bpm: f64) -> Message {
        // ---
        Message::new(Node::TransportTempo, Address::global(), vec![TypedValue::Float(bpm)])
    }

    #[test]
    fn test_register_and_route_reply() {
        // ---
        let mut slot = PendingSlot::new();
        let key = CorrelationKey::new(Node::TransportTempo, Address::global());

        let (_ticket, rx) = slot.register(key.clone()).unwrap();
        assert_eq!(slot.outstanding_key(), Some(&key));

        match slot.route(tempo_reply(128.0)) {
            Routed::Reply(matched) => assert_eq!(matched, key),
            Routed::Push(msg) => panic!("tempo reply routed as push: {msg}"),
        }

        // Should be cleared after delivery
        assert!(slot.outstanding_key().is_none());

        let received = rx.blocking_recv().unwrap();
        assert_eq!(received.val(), &[TypedValue::Float(128.0)]);
    }

    #[test]
    fn test_unmatched_goes_to_push() {
        // ---
        let mut slot = PendingSlot::new();
        let (_ticket, _rx) = slot
            .register(CorrelationKey::new(Node::StripGain, [3]))
            .unwrap();

        let push = Message::new(Node::StripPan, [3], vec![TypedValue::Float(0.5)]);
        match slot.route(push.clone()) {
            Routed::Push(msg) => assert_eq!(msg, push),
            Routed::Reply(_) => panic!("pan update must not resolve a gain request"),
        }

        // Still waiting for the gain reply
        assert!(slot.outstanding_key().is_some());
    }

    #[test]
    fn test_nothing_outstanding_is_push() {
        // ---
        let mut slot = PendingSlot::new();
        assert!(matches!(slot.route(tempo_reply(90.0)), Routed::Push(_)));
    }

    #[test]
    fn test_second_register_rejected() {
        // ---
        let mut slot = PendingSlot::new();
        let first = CorrelationKey::new(Node::StripGain, [3]);

        let _pending = slot.register(first.clone()).unwrap();
        let second = slot.register(CorrelationKey::new(Node::StripPan, [3]));

        assert!(matches!(second, Err(Error::RequestInFlight)));
        assert_eq!(slot.outstanding_key(), Some(&first));
    }

    #[test]
    fn test_release_only_own_ticket() {
        // ---
        let mut slot = PendingSlot::new();
        let key = CorrelationKey::new(Node::TransportRoll, Address::global());

        let (old_ticket, _rx) = slot.register(key.clone()).unwrap();
        assert!(slot.release(old_ticket));

        let (new_ticket, _rx) = slot.register(key).unwrap();
        assert!(!slot.release(old_ticket));
        assert!(slot.outstanding_key().is_some());
        assert!(slot.release(new_ticket));
        assert!(slot.outstanding_key().is_none());
    }

    #[test]
    fn test_reply_after_waiter_dropped_is_push() {
        // ---
        let mut slot = PendingSlot::new();
        let (_ticket, rx) = slot
            .register(CorrelationKey::new(Node::TransportTempo, Address::global()))
            .unwrap();
        drop(rx);

        assert!(matches!(slot.route(tempo_reply(100.0)), Routed::Push(_)));
        assert!(slot.outstanding_key().is_none());
    }

    #[test]
    fn test_close_releases_waiter() {
        // ---
        let mut slot = PendingSlot::new();
        let (_ticket, rx) = slot
            .register(CorrelationKey::new(Node::StripMute, [0]))
            .unwrap();

        assert!(slot.close());
        assert!(rx.blocking_recv().is_err());
        assert!(!slot.close());

        let again = slot.register(CorrelationKey::new(Node::StripMute, [0]));
        assert!(matches!(again, Err(Error::ConnectionClosed)));
    }
}
