use std::fmt;

use crate::{Address, Message, Node};

/// Key for matching a reply to the request that asked for it.
///
/// The server answers a query by echoing the node and address it was asked
/// about, so the key is exactly that pair. Values never participate. The key
/// is kept structured rather than flattened into a string, so two different
/// `(node, address)` pairs can never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey {
    node: Node,
    addr: Address,
}

impl CorrelationKey {
    // ---

    pub fn new(node: Node, addr: impl Into<Address>) -> Self {
        // ---
        Self {
            node,
            addr: addr.into(),
        }
    }

    pub fn node(&self) -> Node {
        self.node
    }

    pub fn addr(&self) -> &Address {
        &self.addr
    }

    /// True if `msg` is for this node and address.
    pub fn matches(&self, msg: &Message) -> bool {
        // ---
        self.node == msg.node() && &self.addr == msg.addr()
    }
}

impl fmt::Display for CorrelationKey {
    // ---

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        write!(f, "{}{}", self.node, self.addr)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_matches_ignores_values() {
        // ---
        let key = CorrelationKey::new(Node::StripGain, [3]);

        assert!(key.matches(&Message::new(Node::StripGain, [3], vec![(-6.0).into()])));
        assert!(key.matches(&Message::new(Node::StripGain, [3], vec![])));
        assert!(!key.matches(&Message::new(Node::StripGain, [30], vec![])));
        assert!(!key.matches(&Message::new(Node::StripPan, [3], vec![])));
    }

    #[test]
    fn test_same_inputs_same_key() {
        // ---
        let k1 = CorrelationKey::new(Node::StripPluginEnable, [2, 1]);
        let k2 = CorrelationKey::new(Node::StripPluginEnable, [2, 1]);
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_node_or_address_change_key() {
        // ---
        let keys: HashSet<CorrelationKey> = [
            CorrelationKey::new(Node::StripGain, [3]),
            CorrelationKey::new(Node::StripPan, [3]),
            CorrelationKey::new(Node::StripGain, [3, 0]),
            CorrelationKey::new(Node::StripGain, [30]),
            CorrelationKey::new(Node::StripGain, Address::global()),
            CorrelationKey::new(Node::StripPluginParamValue, [1, 12]),
            CorrelationKey::new(Node::StripPluginParamValue, [11, 2]),
        ]
        .into_iter()
        .collect();

        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn test_display() {
        // ---
        let key = CorrelationKey::new(Node::StripPluginParamValue, [0, 1, 2]);
        assert_eq!(key.to_string(), "strip_plugin_param_value[0,1,2]");
    }
}
