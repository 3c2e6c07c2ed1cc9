/*
 * Responsibility
 * - Identity / Role: the shape every guard sees, whatever the provenance
 * - IdentityResolver: capability to turn verified claims into an Identity
 *   - DemoRoster (fixed in-memory table) / LiveResolver (users table)
 */
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::services::auth::error::AuthError;
use crate::services::auth::token_verifier::Claims;

pub mod demo;
pub mod live;

pub use demo::DemoRoster;
pub use live::LiveResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    CommunityAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::CommunityAdmin => "community_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "community_admin" => Ok(Role::CommunityAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A resolved caller. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub community_ref: Option<String>,
    pub is_active: bool,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Maps verified claims to an identity.
///
/// Exactly one implementation is chosen at startup (see `factory`) and shared
/// by all requests, so implementations must not keep per-request state.
#[async_trait]
pub trait IdentityResolver: Send + Sync + 'static {
    // Strategy name (for logging).
    fn strategy_name(&self) -> &'static str;

    async fn resolve(&self, claims: &Claims) -> Result<Identity, AuthError>;
}
