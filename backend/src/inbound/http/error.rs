//! Maps domain [`Error`] payloads onto HTTP status codes.
//!
//! Every failure leaves the service as the same JSON envelope with the
//! request's trace identifier echoed in a header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Store and driver messages never leave the process.
fn redact_if_internal(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            tracing::error!(message = error.message(), "internal error returned to client");
            let mut redacted = Error::internal("Internal server error");
            if let Some(id) = error.trace_id() {
                redacted = redacted.with_trace_id(id.to_owned());
            }
            redacted
        }
        ErrorCode::ServiceUnavailable => {
            tracing::warn!(message = error.message(), "dependency unavailable");
            let mut redacted = Error::service_unavailable("Service temporarily unavailable");
            if let Some(id) = error.trace_id() {
                redacted = redacted.with_trace_id(id.to_owned());
            }
            redacted
        }
        _ => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}
