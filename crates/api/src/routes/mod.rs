pub mod health;
pub mod validate;

use axum::Router;
use axum::extract::DefaultBodyLimit;

use crate::state::AppState;

/// Build the complete API router with all routes.
///
/// The body limit is enforced by the extractors, so oversized bodies reach
/// the handler as a rejection and leave as a JSON error.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    Router::new()
        .merge(health::router())
        .merge(validate::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
