//! HTTP transport: wires the signing core into an [`axum::Router`]. Bears
//! the same shape as `anvil-server`'s `serve_http` — a router, a
//! `TraceLayer` for request logging, a bound listener — scaled down to
//! this service's three plain REST routes instead of a JSON-RPC dispatch
//! table.

pub mod handlers;
pub mod types;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::service::SigningCore;

pub fn router(core: SigningCore) -> Router {
    Router::new()
        .route("/api/v0/create-device", post(handlers::create_device))
        .route("/api/v0/sign-transaction", post(handlers::sign_transaction))
        .route("/api/v0/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(core)
}

/// Binds `addr` and serves `core` until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    core: SigningCore,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router(core)).with_graceful_shutdown(shutdown).await
}
