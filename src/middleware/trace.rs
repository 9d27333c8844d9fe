//! # Request Tracing
//!
//! Span and response hooks for `tower_http::trace::TraceLayer`. Every request
//! gets a span with its method, path and a fresh `request_id`. The response
//! event is leveled by status the same way rendered errors are.

use std::time::Duration;

use axum::{extract::Request, response::Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, TraceLayer};
use tracing::{Span, error, info, info_span, warn};
use uuid::Uuid;

use crate::logging::Severity;

type RequestTrace = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request) -> Span,
    DefaultOnRequest,
    fn(&Response, Duration, &Span),
>;

pub fn make_request_span(req: &Request) -> Span {
    info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %Uuid::new_v4()
    )
}

pub fn log_response(res: &Response, latency: Duration, _span: &Span) {
    let status = res.status().as_u16();
    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);

    match Severity::of(res.status()) {
        Severity::Error => error!(status, latency_ms, "Request failed"),
        Severity::Warn => warn!(status, latency_ms, "Request rejected"),
        Severity::Info => info!(status, latency_ms, "Request completed"),
    }
}

/// The trace layer installed on the demo router.
pub fn request_trace() -> RequestTrace {
    TraceLayer::new_for_http()
        .make_span_with(make_request_span as fn(&Request) -> Span)
        .on_response(log_response as fn(&Response, Duration, &Span))
}
