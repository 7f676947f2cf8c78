//! REST API for projection results and the run summary.
//!
//! Provides two GET endpoints:
//! - `/summary` — run parameters, summary report, and final-year record
//! - `/results` — full per-year results with optional year-range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

pub use types::RunInfo;

use crate::sim::kpi::SummaryReport;
use crate::sim::types::AnnualResult;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the projection run completes and wrapped in
/// `Arc` — no locks needed since all data is read-only.
pub struct AppState {
    /// Run parameters used for this projection.
    pub run: RunInfo,
    /// Aggregate summary report.
    pub summary: SummaryReport,
    /// Per-year projection results.
    pub results: Vec<AnnualResult>,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/results", get(handlers::get_results))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
