//! Application layer: load the document, apply the change, persist, derive.

pub mod command_handlers;
pub mod query_handlers;
