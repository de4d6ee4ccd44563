//! EchoTrace hub HTTP API.
//!
//! Exposes narrative state and accessibility profile management to the
//! operator dashboard, and pushes derived runtime payloads to nodes through a
//! [`publisher::ConfigPublisher`].

pub mod config;
pub mod error;
pub mod publisher;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the hub router with every route mounted.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest(
            "/api",
            Router::new()
                .merge(routes::narrative::router())
                .merge(routes::accessibility::router()),
        )
        .with_state(state)
}
