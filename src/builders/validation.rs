//! # Validation Builder
//!
//! Turns a [`ValidationErrors`] aggregate into a parent error whose cause is a
//! list with one child per failed field. This is the only builder producing a
//! list cause, and the children never branch any further.

use std::fmt;

use axum::http::StatusCode;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::{Code, StructuredError};

const VALIDATION_MSG: &str = "Validation Error";

/// Every failure reported for a single field, kept as the child's cause.
#[derive(Debug)]
pub struct FieldFailures(pub Vec<ValidationError>);

impl fmt::Display for FieldFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, err) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldFailures {}

/// Builds the `422` error for a failed struct validation.
pub fn validation_error(errors: ValidationErrors) -> StructuredError {
    let mut fields = Vec::new();
    flatten(&errors, None, &mut fields);
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let children: Vec<StructuredError> = fields
        .into_iter()
        .map(|(field, failures)| {
            StructuredError::new(Code::FieldInvalid, format!("Field '{field}' is not valid"))
                .wrap_err(FieldFailures(failures))
        })
        .collect();

    StructuredError::new(Code::ConditionNotMet, VALIDATION_MSG)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .wrap_all(children)
}

/// Collects `(path, failures)` pairs, descending into nested structs
/// (`address.city`) and lists (`items[0].name`).
fn flatten(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    out: &mut Vec<(String, Vec<ValidationError>)>,
) {
    for (name, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(failures) => out.push((path, failures.clone())),
            ValidationErrorsKind::Struct(nested) => flatten(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten(nested, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}
