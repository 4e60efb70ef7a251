use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use packstore_auth::{AdminCapability, AuthError};

use crate::app::errors::ApiError;
use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AuthState {
    pub admin: Arc<AdminCapability>,
}

/// Gate for mutating catalog routes: the request must carry the admin token.
pub async fn admin_middleware(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let decision = authorization_header(req.headers()).and_then(|h| state.admin.authorize(h));

    if let Err(e) = decision {
        let request_id = req.extensions().get::<RequestContext>().map(|c| c.request_id());
        tracing::warn!(
            request_id = ?request_id,
            method = %req.method(),
            path = req.uri().path(),
            reason = %e,
            "admin request rejected"
        );
        return Err(e.into());
    }

    Ok(next.run(req).await)
}

fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    match headers.get(axum::http::header::AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| AuthError::Unauthenticated),
    }
}

/// Assigns a request id and logs one line per `/api` request.
pub async fn request_log(mut req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let ctx = RequestContext::generate();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    req.extensions_mut().insert(ctx);

    let started = Instant::now();
    let mut res = next.run(req).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id().to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    if path.starts_with("/api") {
        tracing::info!(
            request_id = %ctx.request_id(),
            %method,
            path = %path,
            status = res.status().as_u16(),
            elapsed_ms,
            "request completed"
        );
    }

    res
}
