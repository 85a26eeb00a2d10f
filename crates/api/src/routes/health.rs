//! Health check endpoint.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    // The browser console pings with POST
    Router::new().route("/health", get(health_check).post(health_check))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "eit-feasibility-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
