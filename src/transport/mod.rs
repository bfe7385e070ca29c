//! Transport implementations.
//!
//! This module provides concrete implementations of the domain-level
//! `Transport` trait, exposed only through constructor functions.
//!
//! Domain code must not depend on transport-specific types.

mod memory;

pub use memory::create_transport as create_memory_transport;
pub use memory::MemoryServer;
