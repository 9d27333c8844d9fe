//! # Parameter Builders
//!
//! Used by path and query extraction code. A missing parameter is a malformed
//! request (`400`), a parameter that is present but cannot be parsed into the
//! expected type is an unprocessable one (`422`).

use axum::http::StatusCode;

use crate::error::{Code, StructuredError};

/// Error for a missing URL path parameter.
pub fn param_required(key: &str) -> StructuredError {
    StructuredError::new(Code::ParamRequired, format!("Parameter '{key}' is required"))
        .with_status(StatusCode::BAD_REQUEST)
}

/// Error for a URL path parameter that is not a valid `type_name`.
pub fn param_invalid<E>(key: &str, type_name: &str, err: E, details: &[&str]) -> StructuredError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StructuredError::new(
        Code::ParamInvalid,
        format!("Parameter '{key}' is not valid {type_name}"),
    )
    .with_details(details.iter().copied())
    .with_status(StatusCode::UNPROCESSABLE_ENTITY)
    .wrap_err(err)
}

/// Error for a missing query parameter.
pub fn query_param_required(key: &str) -> StructuredError {
    StructuredError::new(
        Code::QueryParamRequired,
        format!("Query Parameter '{key}' is required"),
    )
    .with_status(StatusCode::BAD_REQUEST)
}

/// Error for a query parameter that is not a valid `type_name`.
pub fn query_param_invalid<E>(
    key: &str,
    type_name: &str,
    err: E,
    details: &[&str],
) -> StructuredError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StructuredError::new(
        Code::QueryParamInvalid,
        format!("Query Parameter '{key}' is not valid {type_name}"),
    )
    .with_details(details.iter().copied())
    .with_status(StatusCode::UNPROCESSABLE_ENTITY)
    .wrap_err(err)
}
