use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use packstore_auth::AuthError;
use packstore_catalog::{CheckoutError, StoreError, ValidationErrors};
use packstore_core::DomainError;

pub const PACK_NOT_FOUND: &str = "Pack not found";
pub const NO_FEATURED_PACK: &str = "No featured pack found";
pub const INVALID_PACK_DATA: &str = "Invalid pack data";
pub const INTERNAL_ERROR: &str = "Internal Server Error";

/// Every failure a handler can report, mapped to a status and a `{message}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("invalid pack data: {0}")]
    Validation(ValidationErrors),

    #[error("unauthorized")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("{0}")]
    BadRequest(&'static str),

    /// Logged server-side; the caller only sees a generic message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound(message) | ApiError::BadRequest(message) => json_error(status, message),
            ApiError::Validation(errors) => (
                status,
                axum::Json(json!({
                    "message": INVALID_PACK_DATA,
                    "errors": errors,
                })),
            )
                .into_response(),
            ApiError::Unauthenticated => json_error(status, "Unauthorized"),
            ApiError::Forbidden => json_error(status, "Forbidden"),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                json_error(status, INTERNAL_ERROR)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => ApiError::Unauthenticated,
            AuthError::Forbidden => ApiError::Forbidden,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Domain(DomainError::NotFound | DomainError::InvalidId(_)) => {
                ApiError::NotFound(PACK_NOT_FOUND)
            }
            CheckoutError::Store(e) => e.into(),
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "message": message.into() }))).into_response()
}
