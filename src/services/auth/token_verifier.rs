use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::services::auth::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Access token claims as they appear on the wire.
///
/// NOTE:
/// - Older tokens carry the subject under `id`; it is accepted as an alias of `sub`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(alias = "id")]
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Verified claims handed to the identity resolver. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub subject_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// Only `exp` is read when peeking at a token whose signature did not verify.
#[derive(Deserialize)]
struct ExpiryOnly {
    exp: i64,
}

/// HS256 bearer token verifier.
///
/// - Key material is not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify the raw `Authorization` header value.
    pub fn verify(&self, header_value: Option<&str>) -> Result<Claims, AuthError> {
        let token = bearer_token(header_value)?;
        self.verify_token(token)
    }

    /// Verify a bare token (prefix already stripped).
    ///
    /// Expiry is reported ahead of any other defect: a token whose `exp` has
    /// passed yields `TokenExpired` even when its signature is also wrong.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = match jsonwebtoken::decode::<TokenClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        ) {
            Ok(data) => data.claims,
            Err(err) => {
                return Err(match err.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ if self.peek_expired(token, Utc::now()) => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                });
            }
        };

        if claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(AuthError::InvalidToken)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AuthError::InvalidToken)?;

        Ok(Claims {
            subject_id: claims.sub,
            issued_at,
            expires_at,
        })
    }

    // Read `exp` from the unverified payload. Nothing else from it is trusted.
    fn peek_expired(&self, token: &str, now: DateTime<Utc>) -> bool {
        let mut parts = token.split('.');
        let (Some(_), Some(payload), Some(_), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
            return false;
        };

        match serde_json::from_slice::<ExpiryOnly>(&bytes) {
            Ok(ExpiryOnly { exp }) => {
                let leeway = i64::try_from(self.validation.leeway).unwrap_or(i64::MAX);
                exp < now.timestamp().saturating_sub(leeway)
            }
            Err(_) => false,
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AuthError> {
    let token = header_value
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .ok_or(AuthError::MissingToken)?;

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}
