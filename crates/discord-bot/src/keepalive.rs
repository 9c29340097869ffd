//! Liveness probe for hosting platforms that ping the process.
//!
//! A single fixed route, independent of bot state: it answers as long as
//! the process is running, whether or not the gateway connection is up.

use axum::{Router, routing::get};
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

async fn ping() -> &'static str {
    "pong"
}

pub fn router() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .layer(TraceLayer::new_for_http())
}

/// Serve the keep-alive endpoint until the process exits.
pub async fn serve(port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Keep-alive endpoint listening on http://0.0.0.0:{}", port);
    axum::serve(listener, router()).await?;

    Ok(())
}
