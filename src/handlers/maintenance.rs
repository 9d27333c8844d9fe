use axum::response::Response;
use tracing::{instrument, warn};

use crate::error::{Code, StructuredError};
use crate::render::Responder;

/// Reports that the backend is being serviced.
///
/// The error carries no status of its own; the router attaches a
/// [`StatusHint`](crate::render::StatusHint) to this route instead.
#[instrument(skip_all)]
pub async fn maintenance(responder: Responder) -> Response {
    warn!("Request hit a route under maintenance");
    let errx = StructuredError::new(Code::BackendNotReady, "Maintenance in progress")
        .with_details(["retry later"]);
    responder.respond(errx)
}
