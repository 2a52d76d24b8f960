//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn every failure into the same `error` view and status code.
//! This is the single place errors are logged and rendered; extractor
//! failures are funnelled here through the handlers below.

use actix_web::error::{JsonPayloadError, PathError, UrlencodedError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::views::ErrorView;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message shown in place of internal failure details.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Message for request bodies that could not be decoded.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::ValidationFailed | ErrorCode::InvalidIdentifier => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(REDACTED_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

fn log_error(error: &Error, status: StatusCode) {
    let trace_id = error.trace_id().unwrap_or_default();
    if status.is_server_error() {
        error!(
            code = ?error.code(),
            status = status.as_u16(),
            trace_id,
            message = error.message(),
            "request failed"
        );
    } else {
        warn!(
            code = ?error.code(),
            status = status.as_u16(),
            trace_id,
            message = error.message(),
            "request rejected"
        );
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        log_error(self, status);

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        let visible = redact_if_internal(self);
        builder.json(ErrorView::new(&visible))
    }
}

/// Map JSON body failures onto a `400` error view.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(INVALID_BODY_MESSAGE)
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// Map form body failures onto a `400` error view.
pub fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(INVALID_BODY_MESSAGE)
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// Map unparsable path segments onto the invalid identifier error.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "path segment rejected");
    Error::invalid_identifier().into()
}
