//! Route modules organized by bounded context.

pub mod accessibility;
pub mod health;
pub mod narrative;
