//! HTTP server setup

use std::net::SocketAddr;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::create_router;
use crate::AppState;

/// Router with tracing and permissive CORS for the front-end dev server
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve on localhost at the configured `api_port`
pub async fn start_server(state: AppState) -> Result<(), std::io::Error> {
    let port = state.config().await.api_port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Swapline API listening");
    axum::serve(listener, app).await
}
