//! HTTP surface for the EIT feasibility engine.
//!
//! Endpoints:
//! - POST /validate — feasibility metrics for a device configuration
//! - GET|POST /health — liveness probe

pub mod routes;
pub mod state;
