//! # Liveness Responder
//!
//! File: bot/src/liveness/mod.rs
//!
//! ## Overview
//!
//! A tiny HTTP server whose only job is to answer uptime monitors (and
//! hosting platforms that expect a bound port) with `200 OK` and a fixed
//! plain-text body. It shares nothing with the conversation engine.
//!
//! ## Architecture
//!
//! 1. `create_app` builds an Axum router with a single route, `/`, that
//!    accepts any method, wrapped in a `TraceLayer` for request logging.
//! 2. `bind` claims the configured address; a bind failure is fatal.
//! 3. `serve_on` runs the server until the shutdown token is cancelled, then
//!    drains in-flight requests.
//!
use crate::core::config::LivenessConfig;
use crate::core::error::{GpaBotError, Result};
use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing::any, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

/// Binds `config.host:config.port` and serves until `shutdown` is cancelled.
pub async fn serve(config: LivenessConfig, shutdown: CancellationToken) -> Result<()> {
    let listener = bind(&config).await?;
    serve_on(listener, config.body, shutdown).await
}

/// Binds the configured address. Failure here is fatal for `gpabot run`.
pub async fn bind(config: &LivenessConfig) -> Result<TcpListener> {
    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        GpaBotError::Liveness(format!("Failed to bind TCP listener to address {}: {}", addr, e))
    })?;
    info!("Liveness endpoint listening on http://{}/", addr);
    Ok(listener)
}

/// Serves the liveness router on an already bound listener.
pub async fn serve_on(
    listener: TcpListener,
    body: String,
    shutdown: CancellationToken,
) -> Result<()> {
    axum::serve(listener, create_app(body).into_make_service())
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("Liveness HTTP server failed")?;
    info!("Liveness server shutdown complete.");
    Ok(())
}

/// Builds the router: any method on `/` returns `200` with `body`.
pub fn create_app(body: String) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default())
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    Router::new()
        .route("/", any(alive))
        .with_state(Arc::<str>::from(body))
        .layer(ServiceBuilder::new().layer(trace_layer))
}

async fn alive(State(body): State<Arc<str>>) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}
