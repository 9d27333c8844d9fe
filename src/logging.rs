//! # Error Log Fields
//!
//! Converts an unsanitized [`StructuredError`] into an ordered set of log
//! fields and picks a severity from the response status. Opaque causes show
//! their full text here. Diagnostics are attached to the event separately and
//! never end up inside the field map.

use std::fmt;

use axum::http::StatusCode;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{Cause, StructuredError};

/// Ordered key/value fields describing an error.
///
/// Renders as `[code:10007 details[0]:... reason:[...]]` when displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogFields(IndexMap<String, Value>);

impl LogFields {
    /// Builds the fields of `err`: `code` when set, one `details[i]` per
    /// detail and a recursive `reason` summary of the cause.
    pub fn of(err: &StructuredError) -> Self {
        let mut fields = LogFields::default();

        if let Some(code) = err.code {
            fields.insert("code", code.as_i32());
        }

        for (index, detail) in err.details.iter().enumerate() {
            fields.insert(format!("details[{index}]"), detail.as_str());
        }

        if let Some(cause) = &err.cause {
            fields.insert("reason", reason(cause));
        }

        fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }
}

impl From<&StructuredError> for LogFields {
    fn from(err: &StructuredError) -> Self {
        LogFields::of(err)
    }
}

impl fmt::Display for LogFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, (name, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            match value {
                Value::String(text) => write!(f, "{name}:{text}")?,
                other => write!(f, "{name}:{other}")?,
            }
        }
        f.write_str("]")
    }
}

fn nested(err: &StructuredError) -> String {
    let mut fields = LogFields::of(err);
    fields.insert("message", err.message.as_str());
    fields.to_string()
}

fn reason(cause: &Cause) -> String {
    match cause {
        Cause::Single(inner) => nested(inner),
        Cause::List(errs) => {
            let mut fields = LogFields::default();
            for (index, err) in errs.iter().enumerate() {
                fields.insert(format!("errors[{index}]"), nested(err));
            }
            fields.to_string()
        }
        Cause::Opaque(err) => err.to_string(),
    }
}

/// Log level for an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// `5xx` is an error, `4xx` a warning, anything else informational.
    pub fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Severity::Error
        } else if status.is_client_error() {
            Severity::Warn
        } else {
            Severity::Info
        }
    }
}

/// Writes one leveled event for an unsanitized error about to be rendered.
pub fn emit(err: &StructuredError, status: StatusCode) {
    let fields = LogFields::of(err);
    let code = err.code.map(|code| code.as_i32());
    let diagnostic = err.diagnostic().map(tracing::field::display);
    let severity = Severity::of(status);
    let status = status.as_u16();

    match severity {
        Severity::Error => error!(status, code, %fields, diagnostic, "{}", err.message),
        Severity::Warn => warn!(status, code, %fields, diagnostic, "{}", err.message),
        Severity::Info => info!(status, code, %fields, diagnostic, "{}", err.message),
    }
}
