mod common;

use common::spawn_app;
use faultline::Code;
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn parse_number_echoes_the_value() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/api/parse/number?value=42"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "value": 42 }));
}

#[tokio::test]
async fn unparsable_number_is_unprocessable() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/api/parse/number?value=forty-two"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], Code::Invalid.as_i32());
    assert_eq!(body["error"]["message"], "Unable to parse number");
    assert_eq!(
        body["error"]["reason"]["message"],
        "forty-two".parse::<i64>().unwrap_err().to_string()
    );
}

#[tokio::test]
async fn missing_query_parameter_is_a_bad_request() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/api/parse/number"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], Code::QueryParamRequired.as_i32());
    assert_eq!(body["error"]["message"], "Query Parameter 'value' is required");
}

#[tokio::test]
async fn parse_date_returns_the_unix_timestamp() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/api/parse/date?value=2024-01-02T03:04:05Z"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "unix_timestamp": 1_704_164_645 }));
}

#[tokio::test]
async fn unparsable_date_is_unprocessable() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/api/parse/date?value=yesterday"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], Code::Invalid.as_i32());
    assert_eq!(body["error"]["message"], "Unable to parse date time");
    assert!(body["error"]["reason"]["message"].is_string());
}
