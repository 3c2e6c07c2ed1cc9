//! Transport-level layers applied to every route.
//!
//! - `x-request-id`: generated when absent, echoed on the response
//! - access log via `TraceLayer`
//! - transport body cap, checked before routing
//! - extractor body limit (same bound the access middleware uses when it buffers);
//!   enforced only when a body is read, so authentication is reported first
//! - global request timeout
//!
//! Timeouts, oversized bodies and layer failures are rendered in the same
//! `{ success, message }` shape as pipeline errors.

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::{StatusCode, header, header::HeaderName};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::{AppError, ErrorResponse};
use crate::middleware::auth::access::MAX_INSPECTED_BODY_BYTES;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Declared `content-length` above this is refused before any route runs.
pub const MAX_REQUEST_BODY_BYTES: usize = 8 * 1024 * 1024;

async fn handle_layer_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        let body = ErrorResponse {
            success: false,
            message: "REQUEST_TIMEOUT",
        };
        (StatusCode::REQUEST_TIMEOUT, Json(body))
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        let body = ErrorResponse {
            success: false,
            message: "INTERNAL_SERVER_ERROR",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
    }
}

// `RequestBodyLimitLayer` answers 413 in plain text.
async fn shape_payload_too_large(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE || is_json {
        return response;
    }

    // keep x-request-id and the security headers
    let (mut parts, _) = response.into_parts();
    let (shaped, body) = AppError::PayloadTooLarge.into_response().into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(shaped.headers);
    Response::from_parts(parts, body)
}

pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_layer_error))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        // Dropping the inner future on timeout also abandons any pending identity lookup.
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    router
        .layer(DefaultBodyLimit::max(MAX_INSPECTED_BODY_BYTES))
        .layer(layers)
        .layer(middleware::map_response(shape_payload_too_large))
}
