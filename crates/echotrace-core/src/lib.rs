//! EchoTrace Core: shared abstractions.
//!
//! This crate defines the types that both the hub and the nodes depend on:
//! the clock, the error taxonomy, the runtime payload shape, the playback
//! capability and the transport addresses. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod payload;
pub mod playback;
pub mod topics;
