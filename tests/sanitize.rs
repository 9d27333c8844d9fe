use std::io;

use axum::http::StatusCode;
use faultline::error::{Cause, Code, ErrorBody, StructuredError};
use faultline::fault::{Fault, classify};
use faultline::render::{Format, encode};

fn deep_error() -> StructuredError {
    let children = vec![
        StructuredError::new(Code::FieldInvalid, "Field 'name' is not valid")
            .wrap_err(io::Error::other("length")),
        StructuredError::new(Code::FieldInvalid, "Field 'sku' is not valid")
            .with_details(["expected ABC-1234"]),
    ];

    StructuredError::new(Code::Backend, "Outer")
        .with_details(["first", "second"])
        .with_status(StatusCode::BAD_GATEWAY)
        .wrap(
            StructuredError::new(Code::ConditionNotMet, "Validation Error")
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                .wrap(Cause::List(children)),
        )
}

fn assert_no_diagnostics(errx: &StructuredError) {
    assert!(errx.diagnostic.is_none());
    assert!(errx.status.is_none());
    match &errx.cause {
        Some(Cause::Single(inner)) => assert_no_diagnostics(inner),
        Some(Cause::List(children)) => children.iter().for_each(assert_no_diagnostics),
        Some(Cause::Opaque(_)) => panic!("opaque cause survived sanitization"),
        None => {}
    }
}

#[test]
fn sanitize_is_idempotent() {
    let errx = deep_error();

    let once = errx.sanitize();
    let twice = once.sanitize();

    assert_eq!(once, twice);
}

#[test]
fn sanitized_errors_carry_no_diagnostics_at_any_depth() {
    assert_no_diagnostics(&deep_error().sanitize());
    assert_no_diagnostics(&classify(Fault::other(io::Error::other("boom"))).sanitize());
}

#[test]
fn opaque_causes_become_message_only_leaves() {
    let errx = StructuredError::new(Code::Internal, "Internal Server Error")
        .wrap_err(io::Error::other("connection reset"));

    let sanitized = errx.sanitize();

    assert_eq!(
        sanitized.cause,
        Some(Cause::Single(Box::new(StructuredError::leaf("connection reset"))))
    );
}

#[test]
fn sanitize_keeps_code_message_and_details() {
    let sanitized = deep_error().sanitize();

    assert_eq!(sanitized.code, Some(Code::Backend));
    assert_eq!(sanitized.message, "Outer");
    assert_eq!(sanitized.details, vec!["first", "second"]);
}

#[test]
fn rendered_body_round_trips() {
    let sanitized = deep_error().sanitize();

    let json = encode(sanitized.sanitize(), Format::Json).expect("json encoding should succeed");
    let decoded: ErrorBody = serde_json::from_str(&json).expect("body should decode");

    assert_eq!(decoded.error, sanitized);
}

#[test]
fn wire_shape_uses_reason_and_skips_empty_fields() {
    let errx = StructuredError::new(Code::Invalid, "Unable to parse number")
        .wrap_err(io::Error::other("invalid digit found in string"));

    let json = encode(errx.sanitize(), Format::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "error": {
                "code": 10010,
                "message": "Unable to parse number",
                "reason": { "message": "invalid digit found in string" }
            }
        })
    );
}

#[test]
fn codes_round_trip_as_integers() {
    assert_eq!(Code::ParamRequired.as_i32(), 10000);
    assert_eq!(Code::BackendNotReady.as_i32(), 10014);
    assert_eq!(Code::try_from(10005), Ok(Code::Duplicate));
    assert!(Code::try_from(9999).is_err());
}
