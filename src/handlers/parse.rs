//! # Parse Handlers
//!
//! Echo endpoints that parse a single query parameter. Failures flow through
//! `?` into a [`Fault`] and are rendered by its `IntoResponse` impl.

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, instrument};

use crate::builders::query_param_required;
use crate::fault::FaultResult;

#[derive(Debug, Deserialize)]
pub struct ParseQuery {
    pub value: Option<String>,
}

impl ParseQuery {
    fn value(&self) -> FaultResult<&str> {
        Ok(self
            .value
            .as_deref()
            .ok_or_else(|| query_param_required("value"))?)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NumberResponse {
    pub value: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DateTimeResponse {
    pub unix_timestamp: i64,
}

/// `GET /api/parse/number?value=42`
#[instrument(skip_all)]
pub async fn parse_number(Query(query): Query<ParseQuery>) -> FaultResult<Json<NumberResponse>> {
    let value = query.value()?.trim().parse::<i64>()?;
    debug!(value, "Parsed number");
    Ok(Json(NumberResponse { value }))
}

/// `GET /api/parse/date?value=2024-01-02T03:04:05Z`, RFC 3339 only.
#[instrument(skip_all)]
pub async fn parse_date(Query(query): Query<ParseQuery>) -> FaultResult<Json<DateTimeResponse>> {
    let parsed = OffsetDateTime::parse(query.value()?, &Rfc3339)?;
    debug!(%parsed, "Parsed date time");
    Ok(Json(DateTimeResponse {
        unix_timestamp: parsed.unix_timestamp(),
    }))
}
