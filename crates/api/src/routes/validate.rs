//! Feasibility validation route.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use eit_common::error::AppError;
use eit_common::types::{FeasibilityMode, FeasibilityResult};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/validate", post(validate_config))
}

/// Query parameters accepted by `/validate`.
#[derive(Debug, Default, Deserialize)]
pub struct ValidateQuery {
    /// Overrides the server's default mode for this request
    pub mode: Option<FeasibilityMode>,
}

/// POST /validate — Compute feasibility metrics for a device configuration.
///
/// The body is taken as raw JSON so missing and mistyped fields can be
/// reported by name instead of as a generic deserialization failure.
async fn validate_config(
    State(state): State<AppState>,
    query: Result<Query<ValidateQuery>, QueryRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FeasibilityResult>, AppError> {
    let result = evaluate(&state, query, body);
    if let Err(e) = &result {
        tracing::warn!(
            kind = e.kind(),
            field = ?e.field(),
            error = %e,
            "Rejected configuration"
        );
    }
    result.map(Json)
}

fn evaluate(
    state: &AppState,
    query: Result<Query<ValidateQuery>, QueryRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<FeasibilityResult, AppError> {
    let Query(query) = query.map_err(|e| AppError::Decode(e.body_text()))?;
    let Json(body) = body.map_err(|e| json_error(e, state.config.max_body_bytes))?;

    let calculator = match query.mode {
        Some(mode) => state.calculator.with_mode(mode),
        None => state.calculator,
    };
    calculator.compute_json(&body)
}

fn json_error(rejection: JsonRejection, limit: usize) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(limit)
    } else {
        AppError::Decode(rejection.body_text())
    }
}
