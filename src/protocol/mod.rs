/// Wire codec and request/reply correlation keys.
///
/// This module defines the JSON frame format exchanged with the control
/// surface and how a reply is paired with the request that caused it.
mod codec;
mod correlation;

pub use codec::{decode, encode, JSON_INFINITY};
pub use correlation::CorrelationKey;
