//! Domain layer for narrative tracking.

pub mod tracker;
