//! EchoTrace: accessibility profile resolution.
//!
//! Responsible for the persisted profile document (global settings, presets,
//! per-node overrides), quiet-hours evaluation, and resolving all of it into
//! the runtime payload pushed to each node.

pub mod application;
pub mod domain;
