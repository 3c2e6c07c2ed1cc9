//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use pickup_api::services::auth::identity::{Identity, IdentityResolver, Role};
use pickup_api::services::auth::token_verifier::TokenClaims;
use pickup_api::services::auth::{AuthError, AuthService, Claims, TokenVerifier};
use serde_json::Value;

pub const SECRET: &str = "integration-test-secret";

/// HS256 token for `sub`, expiring `exp_offset_secs` from now.
pub fn mint(sub: &str, exp_offset_secs: i64) -> String {
    mint_with_secret(sub, exp_offset_secs, SECRET)
}

pub fn mint_with_secret(sub: &str, exp_offset_secs: i64, secret: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        sub: sub.to_string(),
        iat: now - 5,
        exp: now + exp_offset_secs,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn identity(id: &str, role: Role, community: Option<&str>) -> Identity {
    Identity {
        id: id.to_string(),
        email: format!("{id}@example.org"),
        role,
        name: format!("Resident {id}"),
        community_ref: community.map(str::to_string),
        is_active: true,
    }
}

/// Table-backed resolver standing in for the live store.
#[derive(Default)]
pub struct TableResolver {
    rows: HashMap<String, Identity>,
    fail_with: Option<String>,
    delay: Option<Duration>,
}

impl TableResolver {
    pub fn new(rows: impl IntoIterator<Item = Identity>) -> Self {
        Self {
            rows: rows.into_iter().map(|i| (i.id.clone(), i)).collect(),
            ..Default::default()
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            fail_with: Some(detail.to_string()),
            ..Default::default()
        }
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl IdentityResolver for TableResolver {
    fn strategy_name(&self) -> &'static str {
        "table"
    }

    async fn resolve(&self, claims: &Claims) -> Result<Identity, AuthError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(detail) = &self.fail_with {
            return Err(AuthError::Internal(detail.clone()));
        }
        // Mirrors the live strategy: inactive rows are refused.
        match self.rows.get(&claims.subject_id) {
            None => Err(AuthError::UserNotFound),
            Some(identity) if !identity.is_active => Err(AuthError::AccountDeactivated),
            Some(identity) => Ok(identity.clone()),
        }
    }
}

pub fn auth_service(resolver: impl IdentityResolver) -> AuthService {
    auth_service_with_timeout(resolver, Duration::from_secs(5))
}

pub fn auth_service_with_timeout(resolver: impl IdentityResolver, timeout: Duration) -> AuthService {
    AuthService::new(TokenVerifier::new(SECRET, 0), Arc::new(resolver), timeout)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", bearer(token));
    }

    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
