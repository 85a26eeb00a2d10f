//! Shared application state for the Axum API server.

use eit_common::config::AppConfig;
use eit_engine::calculator::FeasibilityCalculator;

/// Application state shared across all route handlers via Axum `State`.
///
/// Immutable after start-up; cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub calculator: FeasibilityCalculator,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            calculator: FeasibilityCalculator::new(config.validator_mode, config.electrode_policy),
            config,
        }
    }
}
