//! # Parse Builders
//!
//! Numeric, date time and uuid parse failures. The client sent a well formed
//! payload whose value could not be interpreted, hence `422`.

use axum::http::StatusCode;

use crate::error::{Code, StructuredError};

fn unparsable<E>(message: &str, err: E) -> StructuredError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StructuredError::new(Code::Invalid, message)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .wrap_err(err)
}

/// Builds the error for a failed integer or float parse.
pub fn number_error<E>(err: E) -> StructuredError
where
    E: std::error::Error + Send + Sync + 'static,
{
    unparsable("Unable to parse number", err)
}

pub fn date_time_error(err: time::error::Parse) -> StructuredError {
    unparsable("Unable to parse date time", err)
}

pub fn uuid_error(err: uuid::Error) -> StructuredError {
    unparsable("Unable to parse uuid", err)
}
