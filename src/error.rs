//! # Structured Errors
//!
//! This module defines [`StructuredError`], the single error shape every
//! failure is normalized into before it reaches a client. A structured error
//! carries a taxonomy [`Code`], a short message, optional details, an optional
//! HTTP status and an optional cause which may itself be structured, a list of
//! per-field errors, or an opaque foreign error.
//!
//! The same value has two faces:
//!
//! - the **unsanitized** form, which keeps opaque causes and the captured
//!   [`Diagnostic`] and is only ever written to logs
//! - the **sanitized** form produced by [`StructuredError::sanitize`], which is
//!   what gets serialized into response bodies

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

use axum::http::StatusCode;
use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CODE_BASE: i32 = 10000;

/// Machine-readable taxonomy codes, grouped by error family.
///
/// Codes are serialized as integers starting at `10000`. Clients branch on
/// them, so the numbering is part of the wire contract and must never be
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum Code {
    /// A path parameter is missing
    ParamRequired = CODE_BASE,
    /// A path parameter could not be parsed
    ParamInvalid,
    /// A query parameter is missing
    QueryParamRequired,
    /// A query parameter could not be parsed
    QueryParamInvalid,
    /// The operation conflicts with an existing item
    Conflict,
    /// The operation tried to create an item that already exists
    Duplicate,
    /// The item associated with the request has been deleted
    Deleted,
    /// A condition set by the request or the schema was not met
    ConditionNotMet,
    /// A value is outside of the accepted range
    OutOfRange,
    /// The request failed due to an internal error
    Internal,
    /// The provided payload is invalid
    Invalid,
    /// A single struct field is invalid
    FieldInvalid,
    /// A backend (usually the database) failed
    Backend,
    /// The backend could not be reached
    BackendNotConnected,
    /// The backend is not ready to accept requests
    BackendNotReady,
}

impl Code {
    const ALL: [Code; 15] = [
        Code::ParamRequired,
        Code::ParamInvalid,
        Code::QueryParamRequired,
        Code::QueryParamInvalid,
        Code::Conflict,
        Code::Duplicate,
        Code::Deleted,
        Code::ConditionNotMet,
        Code::OutOfRange,
        Code::Internal,
        Code::Invalid,
        Code::FieldInvalid,
        Code::Backend,
        Code::BackendNotConnected,
        Code::BackendNotReady,
    ];

    /// Returns the integer sent over the wire.
    #[inline]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<Code> for i32 {
    fn from(code: Code) -> Self {
        code.as_i32()
    }
}

/// Raised when an integer does not name a known [`Code`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown error code {0}")]
pub struct UnknownCode(pub i32);

impl TryFrom<i32> for Code {
    type Error = UnknownCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Code::ALL
            .into_iter()
            .find(|code| code.as_i32() == value)
            .ok_or(UnknownCode(value))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// A call-stack snapshot taken when an error is created or wrapped.
///
/// Capturing follows the standard `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`
/// switches, so it costs nothing when backtraces are disabled.
pub struct Diagnostic(Backtrace);

impl Diagnostic {
    pub fn capture() -> Self {
        Self(Backtrace::capture())
    }

    /// Returns true if frames were actually recorded.
    pub fn is_captured(&self) -> bool {
        self.0.status() == BacktraceStatus::Captured
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The underlying reason of a [`StructuredError`].
#[derive(Debug)]
pub enum Cause {
    /// A single nested structured error
    Single(Box<StructuredError>),
    /// One error per failed field of an aggregate (validation only)
    List(Vec<StructuredError>),
    /// A foreign error with no structure beyond its text
    Opaque(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Cause {
    /// Wraps any foreign error as an opaque cause.
    pub fn opaque<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Cause::Opaque(Box::new(err))
    }

    fn sanitize(&self) -> Cause {
        match self {
            Cause::Single(err) => Cause::Single(Box::new(err.sanitize())),
            Cause::List(errs) => Cause::List(errs.iter().map(StructuredError::sanitize).collect()),
            Cause::Opaque(err) => Cause::Single(Box::new(StructuredError::leaf(err.to_string()))),
        }
    }
}

impl From<StructuredError> for Cause {
    fn from(err: StructuredError) -> Self {
        Cause::Single(Box::new(err))
    }
}

impl From<Vec<StructuredError>> for Cause {
    fn from(errs: Vec<StructuredError>) -> Self {
        Cause::List(errs)
    }
}

impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cause::Single(a), Cause::Single(b)) => a == b,
            (Cause::List(a), Cause::List(b)) => a == b,
            (Cause::Opaque(a), Cause::Opaque(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

/// An error with a taxonomy code, a human message and an optional cause chain,
/// loosely following the PostgreSQL error style guide.
///
/// Instances are built once by a builder, optionally wrapped, and consumed by
/// a single render cycle.
#[derive(Debug, Default)]
pub struct StructuredError {
    pub code: Option<Code>,
    pub message: String,
    pub details: Vec<String>,
    pub cause: Option<Cause>,
    /// Resolved at render time when absent
    pub status: Option<StatusCode>,
    /// Never serialized, only logged
    pub diagnostic: Option<Diagnostic>,
}

impl StructuredError {
    /// Creates an error with a code and a message and captures a diagnostic.
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
            diagnostic: Some(Diagnostic::capture()),
            ..Default::default()
        }
    }

    /// A message-only error, as produced for sanitized opaque causes.
    pub fn leaf(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details.extend(details.into_iter().map(Into::into));
        self
    }

    /// Sets the cause and recaptures the diagnostic at the wrapping site.
    pub fn wrap(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self.diagnostic = Some(Diagnostic::capture());
        self
    }

    /// Sets a list of sibling errors as the cause, one per failed item.
    pub fn wrap_all(self, errs: Vec<StructuredError>) -> Self {
        self.wrap(Cause::List(errs))
    }

    /// Wraps a foreign error as an opaque cause.
    pub fn wrap_err<E>(self, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.wrap(Cause::opaque(err))
    }

    /// Returns the deepest error of a single-child chain.
    ///
    /// Aggregates and opaque causes stop the walk at the error holding them.
    pub fn root_cause(&self) -> &StructuredError {
        match &self.cause {
            Some(Cause::Single(inner)) => inner.root_cause(),
            _ => self,
        }
    }

    /// Returns the captured diagnostic, if frames were recorded.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref().filter(|d| d.is_captured())
    }

    /// Produces the client-safe copy of this error.
    ///
    /// Code, message and details are kept at every level, opaque causes become
    /// message-only leaves, status and diagnostics are dropped. Sanitizing an
    /// already sanitized error yields an equal value.
    pub fn sanitize(&self) -> StructuredError {
        StructuredError {
            code: self.code,
            message: self.message.clone(),
            details: self.details.clone(),
            cause: self.cause.as_ref().map(Cause::sanitize),
            status: None,
            diagnostic: None,
        }
    }
}

/// Shows the message. A list cause appends its members' messages joined by
/// `;`, e.g. `Validation Error: Field 'a' is not valid;Field 'b' is not valid`.
impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;

        if let Some(Cause::List(errs)) = &self.cause {
            f.write_str(": ")?;
            for (index, err) in errs.iter().enumerate() {
                if index > 0 {
                    f.write_str(";")?;
                }
                write!(f, "{err}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for StructuredError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.cause.as_ref()? {
            Cause::Single(inner) => Some(inner.as_ref()),
            Cause::Opaque(inner) => Some(inner.as_ref()),
            Cause::List(_) => None,
        }
    }
}

impl PartialEq for StructuredError {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.message == other.message
            && self.details == other.details
            && self.status == other.status
            && self.cause == other.cause
    }
}

impl Serialize for StructuredError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StructuredError", 4)?;
        if let Some(code) = self.code {
            state.serialize_field("code", &code)?;
        } else {
            state.skip_field("code")?;
        }
        state.serialize_field("message", &self.message)?;
        if self.details.is_empty() {
            state.skip_field("details")?;
        } else {
            state.serialize_field("details", &self.details)?;
        }
        match &self.cause {
            Some(Cause::Single(inner)) => state.serialize_field("reason", inner)?,
            Some(Cause::List(errs)) => state.serialize_field("reason", errs)?,
            Some(Cause::Opaque(err)) => {
                state.serialize_field("reason", &StructuredError::leaf(err.to_string()))?
            }
            None => state.skip_field("reason")?,
        }
        state.end()
    }
}

/// Wire shape used to read rendered bodies back.
#[derive(Deserialize)]
struct Wire {
    #[serde(default)]
    code: Option<Code>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<String>,
    #[serde(default)]
    reason: Option<WireReason>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireReason {
    List(Vec<Wire>),
    Single(Box<Wire>),
}

impl From<Wire> for StructuredError {
    fn from(wire: Wire) -> Self {
        let cause = wire.reason.map(|reason| match reason {
            WireReason::Single(inner) => Cause::Single(Box::new((*inner).into())),
            WireReason::List(items) => Cause::List(items.into_iter().map(Into::into).collect()),
        });

        StructuredError {
            code: wire.code,
            message: wire.message,
            details: wire.details,
            cause,
            status: None,
            diagnostic: None,
        }
    }
}

impl<'de> Deserialize<'de> for StructuredError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Wire::deserialize(deserializer).map(Into::into)
    }
}

/// The rendered response body: `{"error": {...}}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: StructuredError,
}
