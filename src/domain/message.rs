// src/domain/message.rs

use std::fmt;

use crate::{Address, CorrelationKey, Node, TypedValue};

/// One control-surface message.
///
/// Built locally when issuing a command or query, or decoded from a wire
/// frame. Messages are never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    node: Node,
    addr: Address,
    val: Vec<TypedValue>,
}

impl Message {
    // ---

    pub fn new(node: Node, addr: impl Into<Address>, val: Vec<TypedValue>) -> Self {
        // ---
        Self {
            node,
            addr: addr.into(),
            val,
        }
    }

    pub fn node(&self) -> Node {
        self.node
    }

    pub fn addr(&self) -> &Address {
        &self.addr
    }

    pub fn val(&self) -> &[TypedValue] {
        &self.val
    }

    /// Consume the message, keeping only its values.
    pub fn into_values(self) -> Vec<TypedValue> {
        self.val
    }

    /// Key used to pair this message with an outstanding request.
    ///
    /// Values do not participate.
    pub fn correlation_key(&self) -> CorrelationKey {
        // ---
        CorrelationKey::new(self.node, self.addr.clone())
    }
}

impl fmt::Display for Message {
    // ---

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        write!(f, "node = {}, addr = {}, val = [", self.node, self.addr)?;
        for (i, v) in self.val.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}
