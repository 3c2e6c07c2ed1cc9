//! Bearer token → identity → guard chain, then AuthCtx into request extensions.
//!
//! Each protected group of routes gets its own `GuardChain`:
//! ```ignore
//! let admin = Router::new().route("/admin/users/{userId}", delete(deactivate_user));
//! let admin = middleware::auth::access::apply(admin, state.clone(), GuardChain::new([Guard::role([Role::Admin])]));
//! ```
//! The layer is a `route_layer`, so path params are already matched when it runs.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{FromRequestParts, Query, RawPathParams, State},
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};
use serde_json::Value;

use crate::error::AppError;
use crate::services::auth::{GuardChain, ResourceDescriptor};
use crate::state::AppState;

/// Upper bound for bodies buffered for ownership/community checks.
/// Also the extractor body limit set in `middleware::http`.
pub const MAX_INSPECTED_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
struct GuardedState {
    app: AppState,
    chain: Arc<GuardChain>,
}

/// Protect every route of `router` with `chain`.
pub fn apply(router: Router<AppState>, state: AppState, chain: GuardChain) -> Router<AppState> {
    let guarded = GuardedState {
        app: state,
        chain: Arc::new(chain),
    };
    router.route_layer(middleware::from_fn_with_state(guarded, access_middleware))
}

async fn access_middleware(
    State(guarded): State<GuardedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Non-visible-ASCII header values count as no header.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let auth = &guarded.app.auth;
    let chain = guarded.chain.as_ref();

    let ctx = auth.establish(chain, authorization.as_deref()).await?;

    let (mut req, resource) = if chain.needs_resource() {
        describe(req).await?
    } else {
        (req, ResourceDescriptor::new())
    };

    auth.check(chain, &ctx, &resource)?;

    // middleware → extractor
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Collect path params, query params and the JSON body, handing the request
/// back with its body restored for the handler.
async fn describe(req: Request<Body>) -> Result<(Request<Body>, ResourceDescriptor), AppError> {
    let (mut parts, body) = req.into_parts();

    let path: HashMap<String, String> = RawPathParams::from_request_parts(&mut parts, &())
        .await
        .map(|params| {
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(q)| q)
        .unwrap_or_default();

    let bytes = to_bytes(body, MAX_INSPECTED_BODY_BYTES)
        .await
        .map_err(|e| AppError::bad_request("INVALID_BODY", e.to_string()))?;

    // Bodies that are not JSON contribute no fields.
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null)
    };

    let resource = ResourceDescriptor::new()
        .with_path(path)
        .with_query(query)
        .with_body(json);

    Ok((Request::from_parts(parts, Body::from(bytes)), resource))
}
