//! HTTP front end for report lookups.
//!
//! Every path answers the same query interface:
//! `?type=ip-check-report&hash=<id>` returns the parsed report as JSON,
//! served from the cache when it has been seen before.

pub mod cors;
pub mod handlers;

use std::sync::Arc;

use axum::{middleware, Router};
use tracing::info;

use crate::db::ReportCache;
use crate::upstream::Upstream;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn ReportCache>,
    pub upstream: Arc<dyn Upstream>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::report_handler)
        .layer(middleware::from_fn(cors::cors))
        .with_state(state)
}

pub async fn serve(listen: &str, state: AppState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind report server to {}: {}", listen, e))?;

    info!("Report server listening on http://{}/", listener.local_addr()?);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Report server error: {}", e))?;

    Ok(())
}

// ── Tests ──
