//! # Fault Classification
//!
//! [`Fault`] is the closed set of error origins the crate knows how to
//! classify, plus a catch-all. Handlers return `Result<T, Fault>` and use `?`
//! on database, codec, validation and parse errors without naming their kind;
//! [`classify`] then picks the builder for the origin.
//!
//! Errors that arrive type-erased (`Box<dyn Error + Send + Sync>`) are sorted
//! by [`Fault::from_boxed`], which downcasts to each known origin in turn.

use std::num::{ParseFloatError, ParseIntError};

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

use crate::builders;
use crate::error::{Code, StructuredError};

/// A type-erased error of any origin.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience Result type alias that uses [`Fault`] as the error type.
pub type FaultResult<T> = Result<T, Fault>;

/// Every error origin the classifier can tell apart.
#[derive(Debug, Error)]
pub enum Fault {
    /// Already classified, passed through untouched
    #[error(transparent)]
    Structured(#[from] StructuredError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Reading a client supplied JSON document failed
    #[error(transparent)]
    JsonDecode(serde_json::Error),

    /// Writing a JSON representation failed
    #[error("json encode: {0}")]
    JsonEncode(#[source] serde_json::Error),

    #[error(transparent)]
    JsonBody(#[from] JsonRejection),

    #[error(transparent)]
    XmlDecode(#[from] quick_xml::DeError),

    #[error(transparent)]
    XmlEncode(#[from] quick_xml::SeError),

    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),

    #[error(transparent)]
    DateTime(#[from] time::error::Parse),

    #[error(transparent)]
    Uuid(#[from] uuid::Error),

    /// Anything of unknown origin
    #[error("{0}")]
    Other(BoxError),
}

macro_rules! downcast_or_return {
    ($err:ident, $ty:ty, $variant:path) => {
        let $err = match $err.downcast::<$ty>() {
            Ok(inner) => return $variant(*inner),
            Err(other) => other,
        };
    };
}

impl Fault {
    /// Detects the origin of a type-erased error.
    pub fn from_boxed(err: BoxError) -> Fault {
        let err = match err.downcast::<Fault>() {
            Ok(fault) => return *fault,
            Err(other) => other,
        };

        downcast_or_return!(err, StructuredError, Fault::Structured);
        downcast_or_return!(err, sqlx::Error, Fault::Database);
        downcast_or_return!(err, ValidationErrors, Fault::Validation);
        downcast_or_return!(err, serde_json::Error, Fault::json);
        downcast_or_return!(err, JsonRejection, Fault::JsonBody);
        downcast_or_return!(err, quick_xml::DeError, Fault::XmlDecode);
        downcast_or_return!(err, quick_xml::SeError, Fault::XmlEncode);
        downcast_or_return!(err, ParseIntError, Fault::ParseInt);
        downcast_or_return!(err, ParseFloatError, Fault::ParseFloat);
        downcast_or_return!(err, time::error::Parse, Fault::DateTime);
        downcast_or_return!(err, uuid::Error, Fault::Uuid);

        Fault::Other(err)
    }

    /// Wraps a foreign error of unknown origin.
    pub fn other<E>(err: E) -> Fault
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Fault::from_boxed(Box::new(err))
    }

    /// Marks a `serde_json` error as raised while reading client input.
    pub fn json_decode(err: serde_json::Error) -> Fault {
        Fault::JsonDecode(err)
    }

    /// Marks a `serde_json` error as raised while writing a response.
    pub fn json_encode(err: serde_json::Error) -> Fault {
        Fault::JsonEncode(err)
    }

    /// Picks the direction of a `serde_json` error from its input position.
    ///
    /// Errors raised while reading always point at a line (`line() >= 1`).
    /// Serializer errors have no input and report line `0`.
    pub fn json(err: serde_json::Error) -> Fault {
        if err.line() == 0 {
            Fault::JsonEncode(err)
        } else {
            Fault::JsonDecode(err)
        }
    }
}

impl From<serde_json::Error> for Fault {
    fn from(err: serde_json::Error) -> Self {
        Fault::json(err)
    }
}

impl From<BoxError> for Fault {
    fn from(err: BoxError) -> Self {
        Fault::from_boxed(err)
    }
}

/// Classifies an error, defaulting a missing status to `500`.
///
/// Never fails: unknown origins become an internal error wrapping the
/// original value.
pub fn classify(fault: impl Into<Fault>) -> StructuredError {
    classify_with_status(fault, StatusCode::INTERNAL_SERVER_ERROR)
}

/// Classifies an error, using `fallback` when an already structured error
/// carries no status of its own.
pub fn classify_with_status(fault: impl Into<Fault>, fallback: StatusCode) -> StructuredError {
    let mut errx = match fault.into() {
        Fault::Structured(errx) => errx,
        Fault::Database(err) => builders::database_error(err),
        Fault::Validation(errs) => builders::validation_error(errs),
        Fault::JsonDecode(err) => builders::json_decode_error(err),
        Fault::JsonEncode(err) => builders::json_encode_error(err),
        Fault::JsonBody(rejection) => builders::json_rejection_error(rejection),
        Fault::XmlDecode(err) => builders::xml_decode_error(err),
        Fault::XmlEncode(err) => builders::xml_encode_error(err),
        Fault::ParseInt(err) => builders::number_error(err),
        Fault::ParseFloat(err) => builders::number_error(err),
        Fault::DateTime(err) => builders::date_time_error(err),
        Fault::Uuid(err) => builders::uuid_error(err),
        Fault::Other(err) => builders::unknown_boxed_error(err),
    };

    if errx.status.is_none() {
        errx.status = Some(fallback);
    }

    if errx.code.is_none() {
        errx.code = Some(Code::Internal);
    }

    errx
}
