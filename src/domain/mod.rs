//! Domain layer public interface.
//!
//! This module defines the value types exchanged with the control surface
//! and the transport abstraction, independent of wire encoding or any
//! concrete connection library.
//!
//! All domain consumers must import symbols via this module, not by
//! referencing individual files directly.

mod message;
mod node;
mod transport;
mod value;

pub use message::Message;
pub use node::Node;
pub use transport::{
    //
    FrameInbox,
    Transport,
    TransportPtr,
};
pub use value::{
    //
    Address,
    TypedValue,
    ValueList,
};
