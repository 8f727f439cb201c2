use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use route_server::config::ServerConfig;
use route_server::engine::mock::MockEngine;
use route_server::handler::Handler;
use route_server::projector::Projector;
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();

    // No graph-backed engine crate is wired in yet; serve the built-in
    // sample network so the full request path stays exercisable.
    warn!("No routing engine configured; serving the built-in sample network");
    let engine = Arc::new(MockEngine::sample_network());

    let projector = Projector::new(engine.clone(), config.cache_size, config.snap_options())
        .expect("Projection cache size must be nonzero");
    let handler = Handler::new(engine, projector);

    let state = AppState::new(handler);
    let app = create_router(state);

    println!("Route server listening on http://{}", config.bind);
    println!();
    println!("API Endpoints:");
    println!("  GET  /health          - Health check");
    println!("  POST /v1/direct_path  - Solve a point-to-point journey");
    println!("  POST /v1/matrix       - Compute a travel-time matrix");

    let listener = tokio::net::TcpListener::bind(config.bind).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
