//! # Database Builder
//!
//! Maps SQLx errors onto the taxonomy. Driver errors that carry a SQLSTATE
//! code go through a two level lookup: the two character class selects a
//! branch, and for classes `22` and `23` the exact code refines it. Unknown
//! classes and unknown codes fall through to the least specific bucket.

use axum::http::StatusCode;

use crate::error::{Code, StructuredError};

/// Class 08 - Connection Exception
const CONNECTION_CLASS: &str = "08";
/// Class 22 - Data Exception
const DATA_CLASS: &str = "22";
/// Class 23 - Integrity Constraint Violation
const INTEGRITY_CLASS: &str = "23";
/// Class 57 - Operator Intervention
const OPERATOR_INTERVENTION_CLASS: &str = "57";

/// Builds the error for any SQLx failure and keeps it as the cause.
pub fn database_error(err: sqlx::Error) -> StructuredError {
    let errx = match &err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => sqlstate_error(&code),
            None => backend_error(),
        },
        sqlx::Error::RowNotFound => {
            StructuredError::new(Code::Backend, "Not Found").with_status(StatusCode::NOT_FOUND)
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => connection_error(),
        _ => backend_error(),
    };

    errx.wrap_err(err)
}

/// Builds the error for a raw five character SQLSTATE code, without a cause.
pub fn sqlstate_error(code: &str) -> StructuredError {
    match code.get(..2) {
        Some(CONNECTION_CLASS) => connection_error(),
        Some(DATA_CLASS) => data_error(code),
        Some(INTEGRITY_CLASS) => integrity_error(code),
        Some(OPERATOR_INTERVENTION_CLASS) => {
            StructuredError::new(Code::BackendNotReady, "Operator Intervention")
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
        _ => backend_error(),
    }
}

fn data_error(code: &str) -> StructuredError {
    let code = match code {
        // numeric_value_out_of_range, datetime_field_overflow, interval_field_overflow,
        // indicator_overflow, floating_point_exception
        "22003" | "22008" | "22015" | "22022" | "22P01" => Code::OutOfRange,
        // null_value_no_indicator_parameter, null_value_not_allowed
        "22002" | "22004" => Code::ConditionNotMet,
        _ => Code::Conflict,
    };

    StructuredError::new(code, "Data Error").with_status(StatusCode::UNPROCESSABLE_ENTITY)
}

fn integrity_error(code: &str) -> StructuredError {
    let code = match code {
        // unique_violation
        "23505" => Code::Duplicate,
        // check_violation, exclusion_violation
        "23514" | "23P01" => Code::ConditionNotMet,
        _ => Code::Conflict,
    };

    StructuredError::new(code, "Integrity Constraint Violation").with_status(StatusCode::CONFLICT)
}

fn connection_error() -> StructuredError {
    StructuredError::new(Code::BackendNotConnected, "Connection Error")
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
}

fn backend_error() -> StructuredError {
    StructuredError::new(Code::Backend, "Database Error")
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
}
