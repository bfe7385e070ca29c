// src/transport/memory/mod.rs

//! In-memory transport implementation.
//!
//! This module provides a pure in-process implementation of the domain-level
//! `Transport` trait, paired with a [`MemoryServer`] handle that stands in
//! for the mixing server. It is intended primarily for testing, local
//! execution, and as a reference for transport semantics.
//!
//! ## Reference Semantics
//!
//! The in-memory transport defines the **reference behavior** for the transport
//! layer. A WebSocket transport is expected to approximate it:
//!
//! - Frames arrive in the order they were sent.
//! - No frames are dropped due to timing or scheduling.
//! - A closed connection ends the inbound stream instead of stalling it.

mod transport;

pub use transport::{create_transport, MemoryServer};
