//! # Codec Builders
//!
//! Failures while *reading* client supplied bytes are the client's fault and
//! map to `400 Bad Request`. Failures while *writing* a response
//! representation are a server bug and map to `500 Internal Server Error`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde_json::error::Category;

use crate::error::{Code, StructuredError};

const JSON_MSG: &str = "JSON Error";
const JSON_UNMARSHAL_MSG: &str = "Unable to unmarshal json body";
const JSON_MARSHAL_MSG: &str = "Unable to marshal json";

const XML_UNMARSHAL_MSG: &str = "Unable to unmarshal xml body";
const XML_MARSHAL_MSG: &str = "Unable to marshal xml";

/// Builds the error for a failed JSON decode.
///
/// Syntax, data and premature end of input are malformed client payloads.
/// An I/O failure means the body could not be read at all, which is ours.
pub fn json_decode_error(err: serde_json::Error) -> StructuredError {
    let (code, status) = match err.classify() {
        Category::Syntax | Category::Data | Category::Eof => (Code::Invalid, StatusCode::BAD_REQUEST),
        Category::Io => (Code::Internal, StatusCode::INTERNAL_SERVER_ERROR),
    };

    StructuredError::new(code, JSON_UNMARSHAL_MSG)
        .with_status(status)
        .wrap_err(err)
}

/// Builds the error for a failed JSON encode of a response value.
pub fn json_encode_error(err: serde_json::Error) -> StructuredError {
    StructuredError::new(Code::Internal, JSON_MARSHAL_MSG)
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .wrap_err(err)
}

/// Builds the error for a rejected `axum::Json` extraction.
pub fn json_rejection_error(rejection: JsonRejection) -> StructuredError {
    let (code, status, message) = match &rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::BytesRejection(_) => {
            (Code::Invalid, StatusCode::BAD_REQUEST, JSON_UNMARSHAL_MSG)
        }
        JsonRejection::MissingJsonContentType(_) => (
            Code::Invalid,
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            JSON_UNMARSHAL_MSG,
        ),
        _ => (Code::Internal, StatusCode::INTERNAL_SERVER_ERROR, JSON_MSG),
    };

    StructuredError::new(code, message)
        .with_status(status)
        .wrap_err(rejection)
}

/// Builds the error for a failed XML decode. Every deserializer failure is a
/// malformed or mismatched client payload.
pub fn xml_decode_error(err: quick_xml::DeError) -> StructuredError {
    StructuredError::new(Code::Invalid, XML_UNMARSHAL_MSG)
        .with_status(StatusCode::BAD_REQUEST)
        .wrap_err(err)
}

/// Builds the error for a value that could not be written as XML.
pub fn xml_encode_error(err: quick_xml::SeError) -> StructuredError {
    StructuredError::new(Code::Internal, XML_MARSHAL_MSG)
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .wrap_err(err)
}
