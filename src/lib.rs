//! # Faultline - Structured Errors for HTTP APIs
//!
//! Every error raised while serving a request goes through one pipeline:
//! **classify → log → sanitize → render**. Errors of known origin (validation,
//! JSON and XML codecs, database drivers, number, date time and uuid parsing)
//! get a taxonomy [`Code`](error::Code), an HTTP status and a client-safe
//! message, with the raw error kept as the cause for the logs only.
//!
//! ## Modules
//!
//! - [`error`] - the [`StructuredError`](error::StructuredError) shape and its sanitizer
//! - [`fault`] - error origins and the classifier
//! - [`builders`] - one builder per error origin
//! - [`logging`] - log fields and severity of rendered errors
//! - [`render`] - response rendering with content negotiation
//! - [`services`] - body binding and custom validation rules
//! - [`handlers`], [`middleware`], [`models`] - the demo router
//! - [`utils`] - configuration and logger setup

pub mod builders;
pub mod error;
pub mod fault;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod render;
pub mod services;
pub mod utils;

pub use error::{Cause, Code, ErrorBody, StructuredError};
pub use fault::{Fault, FaultResult, classify, classify_with_status};
pub use render::{Format, Responder, StatusHint};

use axum::{
    Extension, Router,
    http::StatusCode,
    routing::{get, post},
};

use crate::handlers::{
    create_widget, get_widget, health_check, maintenance, parse_date, parse_number,
};
use crate::middleware::request_trace;
use crate::models::AppState;
use crate::services::validation::Registry;
use crate::utils::constant::{SKU_DIGITS_LEN, SKU_PREFIX_LEN};

/// Accepts `ABC-1234`: uppercase letters, a dash, then digits.
pub fn is_sku(value: &str) -> bool {
    let Some((prefix, digits)) = value.split_once('-') else {
        return false;
    };

    prefix.len() == SKU_PREFIX_LEN
        && prefix.bytes().all(|b| b.is_ascii_uppercase())
        && digits.len() == SKU_DIGITS_LEN
        && digits.bytes().all(|b| b.is_ascii_digit())
}

/// The rules used by the demo API.
pub fn default_registry() -> Registry {
    Registry::new().register("sku", is_sku)
}

/// Creates the demo router with the default validation rules.
#[inline]
pub fn app() -> Router {
    app_with_registry(default_registry())
}

/// Creates the demo router with a caller supplied rule registry.
///
/// # Routes
///
/// - `GET /health-check`
/// - `POST /api/widgets` - JSON or XML body, validated
/// - `GET /api/widgets/{id}` - uuid path parameter, never found
/// - `GET /api/parse/number?value=` and `GET /api/parse/date?value=`
/// - `GET /api/maintenance` - a status-less error rendered as `503`
pub fn app_with_registry(registry: Registry) -> Router {
    let state = AppState::new(registry);

    let api_routes = Router::new()
        .route("/api/widgets", post(create_widget))
        .route("/api/widgets/{id}", get(get_widget))
        .route("/api/parse/number", get(parse_number))
        .route("/api/parse/date", get(parse_date))
        .route(
            "/api/maintenance",
            get(maintenance).layer(Extension(StatusHint(StatusCode::SERVICE_UNAVAILABLE))),
        );

    Router::new()
        .route("/health-check", get(health_check))
        .merge(api_routes)
        .layer(request_trace())
        .with_state(state)
}
