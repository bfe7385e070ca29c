// src/protocol/codec.rs

//! JSON wire codec.
//!
//! Each frame is one JSON object:
//!
//! ```text
//! { "node": "strip_gain", "addr": [3], "val": [-6.0] }
//! ```
//!
//! `addr` and `val` may be absent on inbound frames and then default to
//! empty sequences. Outbound frames always carry both.
//!
//! ## Infinity sentinel
//!
//! JSON has no representation for infinite floats, so the surface uses
//! [`JSON_INFINITY`] in its place. On encode, `±inf` becomes
//! `±JSON_INFINITY`. On decode, any float whose magnitude is at least
//! `JSON_INFINITY` becomes the infinity of the same sign.

use serde::{Deserialize, Serialize};

use crate::{Address, Error, Message, Node, Result, TypedValue};

/// Finite stand-in for infinity on the wire.
pub const JSON_INFINITY: f64 = 1.0e128;

#[derive(Serialize)]
struct OutboundFrame<'a> {
    node: &'static str,
    addr: &'a Address,
    val: Vec<TypedValue>,
}

#[derive(Deserialize)]
struct InboundFrame {
    node: String,
    #[serde(default)]
    addr: Address,
    #[serde(default)]
    val: Vec<TypedValue>,
}

/// Encode a message as a wire frame.
///
/// # Errors
///
/// Returns [`Error::UnrepresentableValue`] if the message carries a NaN.
pub fn encode(msg: &Message) -> Result<String> {
    // ---
    let val = msg
        .val()
        .iter()
        .map(to_wire)
        .collect::<Result<Vec<_>>>()?;

    let frame = OutboundFrame {
        node: msg.node().as_str(),
        addr: msg.addr(),
        val,
    };

    Ok(serde_json::to_string(&frame)?)
}

/// Decode a wire frame into a message.
///
/// # Errors
///
/// - [`Error::MalformedMessage`] if the text is not a JSON object of the
///   expected shape (missing `node`, negative address component, value that
///   is not a bool, number or string, ...)
/// - [`Error::UnknownNode`] if `node` is not in the catalogue
pub fn decode(text: &str) -> Result<Message> {
    // ---
    let frame: InboundFrame = serde_json::from_str(text)?;
    let node: Node = frame.node.parse()?;
    let val = frame.val.into_iter().map(from_wire).collect();

    Ok(Message::new(node, frame.addr, val))
}

fn to_wire(value: &TypedValue) -> Result<TypedValue> {
    // ---
    match value {
        TypedValue::Float(f) if f.is_nan() => Err(Error::UnrepresentableValue(
            "NaN has no wire representation".into(),
        )),
        TypedValue::Float(f) if *f == f64::INFINITY => Ok(TypedValue::Float(JSON_INFINITY)),
        TypedValue::Float(f) if *f == f64::NEG_INFINITY => Ok(TypedValue::Float(-JSON_INFINITY)),
        other => Ok(other.clone()),
    }
}

fn from_wire(value: TypedValue) -> TypedValue {
    // ---
    match value {
        TypedValue::Float(f) if f >= JSON_INFINITY => TypedValue::Float(f64::INFINITY),
        TypedValue::Float(f) if f <= -JSON_INFINITY => TypedValue::Float(f64::NEG_INFINITY),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn sample_values() -> Vec<TypedValue> {
        // ---
        vec![
            TypedValue::Bool(true),
            TypedValue::Bool(false),
            TypedValue::Int(0),
            TypedValue::Int(-1),
            TypedValue::Float(3.25),
            TypedValue::Float(f64::INFINITY),
            TypedValue::Float(f64::NEG_INFINITY),
            TypedValue::from("text"),
        ]
    }

    #[test]
    fn test_round_trip_each_value() {
        // ---
        for (i, value) in sample_values().into_iter().enumerate() {
            let msg = Message::new(Node::StripPluginParamValue, [i as u32, 1, 2], vec![value]);
            let text = encode(&msg).unwrap();
            assert_eq!(decode(&text).unwrap(), msg, "frame: {text}");
        }
    }

    #[test]
    fn test_round_trip_all_values_together() {
        // ---
        let msg = Message::new(Node::StripDescription, [7], sample_values());
        let text = encode(&msg).unwrap();
        assert_eq!(decode(&text).unwrap(), msg);
    }

    #[test]
    fn test_infinity_uses_sentinel_on_wire() {
        // ---
        let msg = Message::new(
            Node::StripGain,
            [0],
            vec![TypedValue::Float(f64::NEG_INFINITY)],
        );
        let text = encode(&msg).unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["val"][0].as_f64(), Some(-JSON_INFINITY));
    }

    #[test]
    fn test_sentinel_boundary() {
        // ---
        let at = Message::new(Node::StripGain, [1], vec![TypedValue::Float(1.0e128)]);
        let decoded = decode(&encode(&at).unwrap()).unwrap();
        assert_eq!(decoded.val(), &[TypedValue::Float(f64::INFINITY)]);

        let below = Message::new(Node::StripGain, [1], vec![TypedValue::Float(9.99e127)]);
        let decoded = decode(&encode(&below).unwrap()).unwrap();
        assert_eq!(decoded.val(), &[TypedValue::Float(9.99e127)]);

        let decoded = decode(r#"{"node":"strip_gain","addr":[1],"val":[-2e128]}"#).unwrap();
        assert_eq!(decoded.val(), &[TypedValue::Float(f64::NEG_INFINITY)]);
    }

    #[test]
    fn test_nan_is_rejected() {
        // ---
        let msg = Message::new(Node::StripPan, [0], vec![TypedValue::Float(f64::NAN)]);
        assert!(matches!(encode(&msg), Err(Error::UnrepresentableValue(_))));
    }

    #[test]
    fn test_wire_shape() {
        // ---
        let msg = Message::new(Node::TransportTempo, Address::global(), vec![TypedValue::Float(120.0)]);
        assert_eq!(
            encode(&msg).unwrap(),
            r#"{"node":"transport_tempo","addr":[],"val":[120.0]}"#
        );
    }

    #[test]
    fn test_integer_and_float_kinds_preserved() {
        // ---
        let msg = decode(r#"{"node":"strip_meter","addr":[0],"val":[5,5.0]}"#).unwrap();
        assert_eq!(msg.val(), &[TypedValue::Int(5), TypedValue::Float(5.0)]);
    }

    #[test]
    fn test_missing_addr_and_val_default_empty() {
        // ---
        let msg = decode(r#"{"node":"transport_roll"}"#).unwrap();
        assert!(msg.addr().is_empty());
        assert!(msg.val().is_empty());

        let msg = decode(r#"{"node":"transport_roll","addr":[],"val":[]}"#).unwrap();
        assert!(msg.addr().is_empty());
        assert!(msg.val().is_empty());
    }

    #[test]
    fn test_extra_fields_ignored() {
        // ---
        let msg = decode(r#"{"node":"strip_mute","addr":[2],"val":[true],"seq":9}"#).unwrap();
        assert_eq!(msg.val(), &[TypedValue::Bool(true)]);
    }

    #[test]
    fn test_missing_node_is_malformed() {
        // ---
        let err = decode(r#"{"addr":[1],"val":[1.0]}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedMessage(_)));
    }

    #[test]
    fn test_unknown_node() {
        // ---
        let err = decode(r#"{"node":"not_a_real_node"}"#).unwrap_err();
        assert!(matches!(err, Error::UnknownNode(_)));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_schema_violations_are_malformed() {
        // ---
        let cases = [
            "",
            "not json",
            "[]",
            r#"{"node":42}"#,
            r#"{"node":"strip_gain","addr":[-1]}"#,
            r#"{"node":"strip_gain","addr":"3"}"#,
            r#"{"node":"strip_gain","val":[null]}"#,
            r#"{"node":"strip_gain","val":[[1]]}"#,
            r#"{"node":"strip_gain","val":[{"x":1}]}"#,
        ];

        for text in cases {
            let err = decode(text).unwrap_err();
            assert!(matches!(err, Error::MalformedMessage(_)), "input: {text:?}");
        }
    }
}
