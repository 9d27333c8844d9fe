//! # Origin Builders
//!
//! One builder per known error family. Every builder is a pure function that
//! turns a raw error into a [`StructuredError`](crate::error::StructuredError)
//! with a code, a message chosen to be safe for clients, an HTTP status, and
//! the raw error kept as the cause.
//!
//! - [`codec`] - JSON and XML marshal/unmarshal failures
//! - [`database`] - SQLx driver errors keyed by SQLSTATE class
//! - [`params`] - missing or unparsable path and query parameters
//! - [`parse`] - numeric, date time and uuid parse failures
//! - [`validation`] - per-field struct validation failures

pub mod codec;
pub mod database;
pub mod params;
pub mod parse;
pub mod validation;

pub use codec::{
    json_decode_error, json_encode_error, json_rejection_error, xml_decode_error, xml_encode_error,
};
pub use database::{database_error, sqlstate_error};
pub use params::{param_invalid, param_required, query_param_invalid, query_param_required};
pub use parse::{date_time_error, number_error, uuid_error};
pub use validation::validation_error;

use axum::http::StatusCode;

use crate::error::{Cause, Code, StructuredError};
use crate::fault::BoxError;

/// Fallback for errors of unknown origin: an internal error keeping the
/// original value as an opaque cause.
pub fn unknown_boxed_error(err: BoxError) -> StructuredError {
    StructuredError::new(Code::Internal, "Internal Server Error")
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .wrap(Cause::Opaque(err))
}
