/*
 * Responsibility
 * - The per-request "who is calling" context that handlers see
 * - The access middleware builds it once and stores it in request extensions
 *
 * Notes
 * - Token verification / identity lookup / guards live in services::auth
 * - Fixed here as a contract, independent of how identities are resolved
 */
use crate::services::auth::identity::{Identity, Role};

/// Context attached to every request that passed through a guard chain.
///
/// - `identity` is `None` only on optional-auth routes for anonymous callers
/// - an attached identity is always active
#[derive(Debug, Clone, Default)]
pub struct AuthCtx {
    identity: Option<Identity>,
}

impl AuthCtx {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.identity().map(|i| i.id.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.identity().map(|i| i.email.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|i| i.role)
    }

    pub fn community_ref(&self) -> Option<&str> {
        self.identity().and_then(|i| i.community_ref.as_deref())
    }
}
