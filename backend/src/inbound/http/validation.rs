//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::web::{JsonConfig, QueryConfig};
use serde_json::json;

use crate::domain::{Error, VolunteerId, VolunteerStatus};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCode {
    InvalidId,
    InvalidBody,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

/// Parse a path segment as a volunteer identifier.
///
/// Identifiers are positive integers assigned by the store.
pub(crate) fn parse_volunteer_id(raw: &str) -> Result<VolunteerId, Error> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Ok(VolunteerId::new(value)),
        _ => Err(
            Error::invalid_request("volunteer id must be a positive integer").with_details(json!({
                "field": "id",
                "value": raw,
                "code": ErrorCode::InvalidId.as_str(),
            })),
        ),
    }
}

/// Parse a status path segment or body field.
pub(crate) fn parse_status(raw: &str) -> Result<VolunteerStatus, Error> {
    raw.parse::<VolunteerStatus>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "value": raw,
            "code": err.code(),
        }))
    })
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}"))
        .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
        .into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}"))
        .with_details(json!({ "code": ErrorCode::InvalidQuery.as_str() }))
        .into()
}

/// JSON extractor configuration emitting the shared error envelope.
pub fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor configuration emitting the shared error envelope.
pub fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(query_error_handler)
}
