// src/domain/node.rs

//! Node catalogue.
//!
//! A [`Node`] names a class of addressable control point on the mixing
//! server. The set is closed: wire names that are not listed here are
//! rejected at decode time with [`Error::UnknownNode`].

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Addressable control point on the remote mixer.
///
/// The stable string form returned by [`Node::as_str`] is used both on the
/// wire and as part of a [`CorrelationKey`](crate::CorrelationKey).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    StripDescription,
    StripMeter,
    StripGain,
    StripPan,
    StripMute,
    StripPluginDescription,
    StripPluginEnable,
    StripPluginParamDescription,
    StripPluginParamValue,
    TransportTempo,
    TransportTime,
    TransportRoll,
    TransportRecord,
}

impl Node {
    // ---

    /// Every node in the catalogue.
    pub const ALL: [Node; 13] = [
        Node::StripDescription,
        Node::StripMeter,
        Node::StripGain,
        Node::StripPan,
        Node::StripMute,
        Node::StripPluginDescription,
        Node::StripPluginEnable,
        Node::StripPluginParamDescription,
        Node::StripPluginParamValue,
        Node::TransportTempo,
        Node::TransportTime,
        Node::TransportRoll,
        Node::TransportRecord,
    ];

    /// Wire name of this node.
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            Node::StripDescription => "strip_description",
            Node::StripMeter => "strip_meter",
            Node::StripGain => "strip_gain",
            Node::StripPan => "strip_pan",
            Node::StripMute => "strip_mute",
            Node::StripPluginDescription => "strip_plugin_description",
            Node::StripPluginEnable => "strip_plugin_enable",
            Node::StripPluginParamDescription => "strip_plugin_param_description",
            Node::StripPluginParamValue => "strip_plugin_param_value",
            Node::TransportTempo => "transport_tempo",
            Node::TransportTime => "transport_time",
            Node::TransportRoll => "transport_roll",
            Node::TransportRecord => "transport_record",
        }
    }
}

impl fmt::Display for Node {
    // ---

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        f.write_str(self.as_str())
    }
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // ---
        let node = match s {
            "strip_description" => Node::StripDescription,
            "strip_meter" => Node::StripMeter,
            "strip_gain" => Node::StripGain,
            "strip_pan" => Node::StripPan,
            "strip_mute" => Node::StripMute,
            "strip_plugin_description" => Node::StripPluginDescription,
            "strip_plugin_enable" => Node::StripPluginEnable,
            "strip_plugin_param_description" => Node::StripPluginParamDescription,
            "strip_plugin_param_value" => Node::StripPluginParamValue,
            "transport_tempo" => Node::TransportTempo,
            "transport_time" => Node::TransportTime,
            "transport_roll" => Node::TransportRoll,
            "transport_record" => Node::TransportRecord,
            other => return Err(Error::UnknownNode(other.to_string())),
        };
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_names_parse_back() {
        // ---
        for node in Node::ALL {
            assert_eq!(node.as_str().parse::<Node>().unwrap(), node);
        }
    }

    #[test]
    fn test_unknown_name() {
        // ---
        let err = "not_a_real_node".parse::<Node>().unwrap_err();
        assert!(matches!(err, Error::UnknownNode(ref name) if name == "not_a_real_node"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        // ---
        assert!("STRIP_GAIN".parse::<Node>().is_err());
    }
}
