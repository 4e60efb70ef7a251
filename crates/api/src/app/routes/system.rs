use axum::http::StatusCode;
use axum::response::Response;

use crate::app::errors::{self, INTERNAL_ERROR};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found() -> Response {
    errors::json_error(StatusCode::NOT_FOUND, "Not found")
}

/// Response for a handler that panicked. The payload is logged, never returned.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(%detail, "handler panicked");
    errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}
