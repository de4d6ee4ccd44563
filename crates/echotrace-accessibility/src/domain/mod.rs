//! Domain layer for accessibility profiles.

pub mod commands;
pub mod profiles;
pub mod quiet_hours;
pub mod repository;
pub mod resolver;
