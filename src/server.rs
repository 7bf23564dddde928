// src/server.rs
// GET /scrape → 200 {goldCap, bitcoinCap} | 500 {error}
// GET /health → {"status":"ok"}
// Any origin may call us (the page that shows the countdown lives elsewhere).

use std::{sync::Arc, time::Duration};

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::{
    market::ScrapeReply,
    scrape::{Collected, Collector},
};

pub const SCRAPE_FAILED: &str = "Failed to scrape data";

#[derive(Clone)]
pub struct ServerState {
    pub collector: Arc<Collector>,
    pub fetch_timeout: Duration,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/scrape", get(scrape))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn scrape(State(state): State<ServerState>) -> impl IntoResponse {
    let collected = state.collector.collect_within(state.fetch_timeout).await;
    let (status, reply) = reply_for(&collected);
    (status, Json(reply))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Anything that got a page (or a cached pair) is a 200; transport/structure failures are 500.
pub fn reply_for(collected: &Collected) -> (StatusCode, ScrapeReply) {
    match collected {
        Collected::Failed { reason } => {
            loge!("Serve: scrape failed: {reason}");
            (StatusCode::INTERNAL_SERVER_ERROR, ScrapeReply::Failed { error: s!(SCRAPE_FAILED) })
        }
        other => (StatusCode::OK, ScrapeReply::Snapshot(other.snapshot())),
    }
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve<F>(bind: &str, state: ServerState, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind).await?;
    logf!("Serve: listening on http://{} (source={})", listener.local_addr()?, state.collector.source_name());
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
