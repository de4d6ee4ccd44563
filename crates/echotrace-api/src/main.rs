//! EchoTrace hub API server entry point.

use std::sync::Arc;

use echotrace_api::config::HubConfig;
use echotrace_api::error::AppError;
use echotrace_api::publisher::LoggingConfigPublisher;
use echotrace_api::state::AppState;
use echotrace_core::clock::SystemClock;
use echotrace_narrative::NarrativeTracker;
use echotrace_profile_store::YamlProfileRepository;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting EchoTrace hub API server");

    // Read configuration from environment.
    let config = HubConfig::from_env()?;
    tracing::info!(
        profiles = %config.profiles_path.display(),
        nodes = ?config.nodes,
        required_fragments = config.required_fragments,
        "configuration loaded"
    );

    // Build application state.
    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(YamlProfileRepository::new(config.profiles_path.clone())),
        Arc::new(NarrativeTracker::new(config.required_fragments)),
        Arc::new(LoggingConfigPublisher),
        config.nodes.clone(),
    );

    // TODO: Replace CorsLayer::permissive() with the dashboard origin once it is served separately.
    let app = echotrace_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
