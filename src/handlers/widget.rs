//! # Widget Handlers
//!
//! A small catalog API whose only job is to fail in every way the renderer
//! knows about: undecodable bodies, invalid fields, unparsable path
//! parameters and missing rows.

use axum::{
    Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::builders::param_invalid;
use crate::fault::Fault;
use crate::models::{WidgetRequest, WidgetResponse};
use crate::render::Responder;
use crate::services::validation::Bind;

/// Creates a widget from a JSON or XML body.
///
/// # Responses
///
/// - `201 Created` with the stored widget
/// - `400 Bad Request` when the body cannot be decoded
/// - `415 Unsupported Media Type` when a JSON body lacks its content type
/// - `422 Unprocessable Entity` with one reason per invalid field
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn create_widget(
    responder: Responder,
    payload: Result<Bind<WidgetRequest>, Fault>,
) -> Response {
    let Bind(payload) = match payload {
        Ok(payload) => payload,
        Err(e) => return responder.respond(e),
    };

    let widget = WidgetResponse {
        id: Uuid::new_v4(),
        name: payload.name,
        quantity: payload.quantity,
        sku: payload.sku,
        created_at: OffsetDateTime::now_utc(),
    };

    info!(widget_id = %widget.id, sku = %widget.sku, "Widget created");
    (StatusCode::CREATED, Json(widget)).into_response()
}

/// Looks a widget up by id.
///
/// The demo catalog keeps nothing, so a well formed id always ends in the
/// database's not-found error.
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn get_widget(responder: Responder, Path(id): Path<String>) -> Response {
    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(e) => {
            let errx = param_invalid("id", "uuid", e, &["expected a hyphenated uuid"]);
            return responder.respond(errx);
        }
    };

    info!(widget_id = %id, "Looking up widget");
    responder.respond(sqlx::Error::RowNotFound)
}
