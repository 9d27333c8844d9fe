#![allow(dead_code)]

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Once;

use serde_json::{Value, json};
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::net::TcpListener;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("faultline=debug")
            .with_test_writer()
            .init();
    });
}

/// Spawns the demo application and returns its address.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app() -> String {
    init_tracing_once();

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, faultline::app()).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    address
}

/// A driver error carrying only a SQLSTATE code, standing in for a real
/// PostgreSQL error in classification tests.
#[derive(Debug)]
pub struct FakeDbError {
    pub code: &'static str,
}

impl fmt::Display for FakeDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "database error with sqlstate {}", self.code)
    }
}

impl StdError for FakeDbError {}

impl DatabaseError for FakeDbError {
    fn message(&self) -> &str {
        "fake database error"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Wraps a SQLSTATE code into the error SQLx would return for it.
pub fn sqlstate(code: &'static str) -> sqlx::Error {
    sqlx::Error::Database(Box::new(FakeDbError { code }))
}

pub fn valid_widget() -> Value {
    json!({
        "name": "Sprocket",
        "quantity": 12,
        "owner_email": "owner@example.com",
        "sku": "SPR-0042",
        "dimensions": { "width": 40, "height": 20 }
    })
}

pub fn valid_widget_xml() -> &'static str {
    "<widget>\
        <name>Sprocket</name>\
        <quantity>12</quantity>\
        <owner_email>owner@example.com</owner_email>\
        <sku>SPR-0042</sku>\
        <dimensions><width>40</width><height>20</height></dimensions>\
    </widget>"
}
