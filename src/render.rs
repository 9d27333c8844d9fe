//! # Error Rendering
//!
//! Turns any [`Fault`] into an HTTP response:
//!
//! 1. classify the fault into a [`StructuredError`]
//! 2. log the unsanitized error at a severity chosen by its status
//! 3. sanitize it
//! 4. write `{"error": {...}}` (or `<error>...</error>`) with the status
//!
//! Rendering never fails. If the body itself cannot be encoded the client
//! receives a plain-text `500 Internal Server Error`.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::{Code, ErrorBody, StructuredError};
use crate::fault::{Fault, classify_with_status};
use crate::logging;

const XML_ROOT: &str = "error";

/// Body encoding negotiated from the request's `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    /// Picks XML when the client asks for `application/xml` or `text/xml`,
    /// JSON otherwise.
    pub fn negotiate(headers: &HeaderMap) -> Self {
        let accept = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if accept.contains("application/xml") || accept.contains("text/xml") {
            Format::Xml
        } else {
            Format::Json
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml; charset=utf-8",
        }
    }
}

/// Request-scoped default status for errors that carry none.
///
/// Install it as a request extension, e.g. with
/// `Router::layer(Extension(StatusHint(StatusCode::BAD_GATEWAY)))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusHint(pub StatusCode);

/// Per-request error renderer, extracted from the request parts.
///
/// # Usage in Handlers
///
/// ```rust
/// use axum::response::{IntoResponse, Response};
/// use faultline::render::Responder;
///
/// async fn handler(responder: Responder) -> Response {
///     let parsed = "nope".parse::<i64>();
///     match parsed {
///         Ok(value) => value.to_string().into_response(),
///         Err(e) => responder.respond(e),
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Responder {
    pub format: Format,
    pub hint: Option<StatusCode>,
}

impl Responder {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            format: Format::negotiate(&parts.headers),
            hint: parts.extensions.get::<StatusHint>().map(|hint| hint.0),
        }
    }

    /// Renders `err`, or does nothing at all when there is no error.
    pub fn render(&self, err: Option<Fault>) -> Option<Response> {
        err.map(|err| self.respond(err))
    }

    /// Classifies and renders an error.
    pub fn respond(&self, err: impl Into<Fault>) -> Response {
        let fallback = self.hint.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        render_structured(classify_with_status(err, fallback), self.format)
    }
}

impl<S> FromRequestParts<S> for Responder
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Responder::from_parts(parts))
    }
}

/// Renders `err` for the request described by `parts`. Returns `None`, and
/// touches nothing, when `err` is `None`.
pub fn render(parts: &Parts, err: Option<Fault>) -> Option<Response> {
    Responder::from_parts(parts).render(err)
}

/// Logs, sanitizes and writes an already classified error.
pub fn render_structured(errx: StructuredError, format: Format) -> Response {
    let status = errx.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    logging::emit(&errx, status);

    let mut body = errx.sanitize();
    // Only the top level; nested messages are sent as classified.
    if body.message.is_empty() {
        body.message = status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_string();
    }
    if body.code.is_none() {
        body.code = Some(Code::Internal);
    }

    respond_encoded(status, encode(body, format), format)
}

/// Writes an encoded error body, or a plain-text `500` when encoding failed.
pub fn respond_encoded(
    status: StatusCode,
    encoded: Result<String, Fault>,
    format: Format,
) -> Response {
    match encoded {
        Ok(payload) => {
            (status, [(header::CONTENT_TYPE, format.content_type())], payload).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to encode error response");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Serializes a sanitized error under the top-level `error` key.
pub fn encode(body: StructuredError, format: Format) -> Result<String, Fault> {
    match format {
        Format::Json => {
            serde_json::to_string(&ErrorBody { error: body }).map_err(Fault::json_encode)
        }
        Format::Xml => Ok(quick_xml::se::to_string_with_root(XML_ROOT, &body)?),
    }
}

impl IntoResponse for Fault {
    fn into_response(self) -> Response {
        let errx = classify_with_status(self, StatusCode::INTERNAL_SERVER_ERROR);
        render_structured(errx, Format::Json)
    }
}

impl IntoResponse for StructuredError {
    fn into_response(self) -> Response {
        Fault::Structured(self).into_response()
    }
}
