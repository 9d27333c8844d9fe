//! # Health Check Handler
//!
//! Liveness endpoint used by load balancers and by the integration tests to
//! wait for the server to come up.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Always returns `200 OK` with an empty body.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
