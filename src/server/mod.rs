//! HTTP API over the corpus store.
//!
//! ## API Endpoints
//!
//! - `GET /api/data` - raw corpus files
//! - `GET /api/dashboard` - per-file dashboard metrics
//! - `GET /api/inspector` - per-file inspector data
//! - `GET /api/inspector/{id}` - one inspector record
//! - `GET /api/publications` - all publications
//! - `GET /api/publications/{pub_id}` - one publication
//! - `GET /api/health` - store status

pub mod error;
pub mod handlers;

pub use error::ApiError;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::store::CorpusStore;

pub type SharedStore = Arc<CorpusStore>;

/// Build the API router
pub fn build_router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/data", get(handlers::all_data))
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/inspector", get(handlers::inspector))
        .route("/api/inspector/{id}", get(handlers::inspector_record))
        .route("/api/publications", get(handlers::publications))
        .route("/api/publications/{pub_id}", get(handlers::publication))
        .route("/api/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Serve the API until ctrl-c
pub async fn run_server(store: SharedStore, addr: SocketAddr) -> Result<()> {
    let app = build_router(store);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Serving corpus API at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!("Cannot listen for ctrl-c: {}", e);
            std::future::pending::<()>().await
        }
    }
}
