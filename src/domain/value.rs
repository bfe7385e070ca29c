// src/domain/value.rs

//! Addresses and typed values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered integer path selecting one instance of a node.
///
/// For strip nodes the components are `[strip]`, `[strip, plugin]` or
/// `[strip, plugin, param]`. Global nodes such as the transport tempo use
/// the empty address. Order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Vec<u32>);

impl Address {
    // ---

    /// The empty address used by global nodes.
    pub fn global() -> Self {
        // ---
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for Address {
    fn from(components: Vec<u32>) -> Self {
        // ---
        Self(components)
    }
}

impl From<&[u32]> for Address {
    fn from(components: &[u32]) -> Self {
        // ---
        Self(components.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for Address {
    fn from(components: [u32; N]) -> Self {
        // ---
        Self(components.to_vec())
    }
}

impl fmt::Display for Address {
    // ---

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        f.write_str("[")?;
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{component}")?;
        }
        f.write_str("]")
    }
}

/// A single positional value carried by a message.
///
/// `Float` admits ±infinity. NaN cannot be sent; see
/// [`encode`](crate::encode).
///
/// The untagged representation maps JSON integers to `Int` and any number
/// written with a fraction or exponent to `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Ordered values of a message, interpreted per node.
pub type ValueList = Vec<TypedValue>;

impl TypedValue {
    // ---

    pub fn as_bool(&self) -> Option<bool> {
        // ---
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        // ---
        match self {
            TypedValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    ///
    /// The server writes whole-valued floats such as a gain of `0` without
    /// a fraction, so they arrive as `Int`.
    pub fn as_f64(&self) -> Option<f64> {
        // ---
        match self {
            TypedValue::Float(f) => Some(*f),
            TypedValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        // ---
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name for diagnostics.
    pub fn kind(&self) -> &'static str {
        // ---
        match self {
            TypedValue::Bool(_) => "bool",
            TypedValue::Int(_) => "int",
            TypedValue::Float(_) => "float",
            TypedValue::Text(_) => "text",
        }
    }
}

impl From<bool> for TypedValue {
    fn from(v: bool) -> Self {
        TypedValue::Bool(v)
    }
}

impl From<i64> for TypedValue {
    fn from(v: i64) -> Self {
        TypedValue::Int(v)
    }
}

impl From<i32> for TypedValue {
    fn from(v: i32) -> Self {
        TypedValue::Int(i64::from(v))
    }
}

impl From<u32> for TypedValue {
    fn from(v: u32) -> Self {
        TypedValue::Int(i64::from(v))
    }
}

impl From<f64> for TypedValue {
    fn from(v: f64) -> Self {
        TypedValue::Float(v)
    }
}

impl From<f32> for TypedValue {
    fn from(v: f32) -> Self {
        TypedValue::Float(f64::from(v))
    }
}

impl From<&str> for TypedValue {
    fn from(v: &str) -> Self {
        TypedValue::Text(v.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(v: String) -> Self {
        TypedValue::Text(v)
    }
}

impl fmt::Display for TypedValue {
    // ---

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        match self {
            TypedValue::Bool(b) => write!(f, "{b}"),
            TypedValue::Int(i) => write!(f, "{i}"),
            TypedValue::Float(v) => write!(f, "{v}"),
            TypedValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}
