use std::fmt;
use std::io;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use faultline::error::{Cause, Code, StructuredError};
use faultline::logging::{LogFields, Severity, emit};
use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[test]
fn fields_list_code_details_and_opaque_reason() {
    let errx = StructuredError::new(Code::Invalid, "Unable to parse number")
        .with_details(["value=abc"])
        .wrap_err(io::Error::other("invalid digit found in string"));

    let fields = LogFields::of(&errx);

    assert_eq!(
        fields.keys().collect::<Vec<_>>(),
        vec!["code", "details[0]", "reason"]
    );
    assert_eq!(fields.get("code"), Some(&json!(10010)));
    assert_eq!(
        fields.to_string(),
        "[code:10010 details[0]:value=abc reason:invalid digit found in string]"
    );
}

#[test]
fn nested_reasons_include_their_message() {
    let errx = StructuredError::new(Code::Backend, "Database Error")
        .wrap(StructuredError::new(Code::OutOfRange, "Data Error"));

    assert_eq!(
        LogFields::of(&errx).to_string(),
        "[code:10012 reason:[code:10008 message:Data Error]]"
    );
}

#[test]
fn list_reasons_are_indexed() {
    let errx = StructuredError::new(Code::ConditionNotMet, "Validation Error").wrap(Cause::List(
        vec![
            StructuredError::new(Code::FieldInvalid, "Field 'a' is not valid"),
            StructuredError::new(Code::FieldInvalid, "Field 'b' is not valid"),
        ],
    ));

    assert_eq!(
        LogFields::of(&errx).to_string(),
        "[code:10007 reason:[errors[0]:[code:10011 message:Field 'a' is not valid] \
         errors[1]:[code:10011 message:Field 'b' is not valid]]]"
    );
}

#[test]
fn bare_errors_have_no_fields() {
    let fields = LogFields::of(&StructuredError::leaf("plain"));

    assert!(fields.is_empty());
    assert_eq!(fields.to_string(), "[]");
}

#[test]
fn severity_follows_the_status_class() {
    assert_eq!(Severity::of(StatusCode::INTERNAL_SERVER_ERROR), Severity::Error);
    assert_eq!(Severity::of(StatusCode::SERVICE_UNAVAILABLE), Severity::Error);
    assert_eq!(Severity::of(StatusCode::UNPROCESSABLE_ENTITY), Severity::Warn);
    assert_eq!(Severity::of(StatusCode::NOT_FOUND), Severity::Warn);
    assert_eq!(Severity::of(StatusCode::OK), Severity::Info);
    assert_eq!(Severity::of(StatusCode::PERMANENT_REDIRECT), Severity::Info);
}

/// One captured event: its level and every recorded field as `name=value`.
#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    fields: Vec<String>,
}

struct FieldRecorder<'a>(&'a mut Vec<String>);

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push(format!("{}={:?}", field.name(), value));
    }
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<Captured>>>);

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Vec::new();
        event.record(&mut FieldRecorder(&mut fields));
        self.0.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            fields,
        });
    }
}

#[test_log::test]
fn emit_levels_by_status_and_keeps_opaque_text() {
    let errx = StructuredError::new(Code::Internal, "Internal Server Error")
        .wrap_err(io::Error::other("secret"));

    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, || {
        emit(&errx, StatusCode::INTERNAL_SERVER_ERROR);
        emit(&errx, StatusCode::BAD_REQUEST);
        emit(&errx, StatusCode::OK);
    });

    let events = capture.0.lock().unwrap().clone();
    let levels: Vec<Level> = events.iter().map(|event| event.level).collect();
    assert_eq!(levels, vec![Level::ERROR, Level::WARN, Level::INFO]);

    for event in &events {
        assert!(
            event.fields.iter().any(|field| field.starts_with("fields=") && field.contains("secret")),
            "opaque text missing from {:?}",
            event.fields
        );
        assert!(event.fields.iter().any(|field| field == "code=10009"));
        assert!(
            event
                .fields
                .iter()
                .any(|field| field.starts_with("message=") && field.contains("Internal Server Error"))
        );
    }
    assert!(events[0].fields.iter().any(|field| field == "status=500"));
    assert!(events[1].fields.iter().any(|field| field == "status=400"));
}
