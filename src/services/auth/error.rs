//! Failure taxonomy of the authorization pipeline.
//!
//! - `AuthError`: the caller's identity could not be established (401), or
//!   the pipeline itself failed (`Internal`, 500).
//! - `Deny`: identity established but the request is forbidden (403).
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::identity::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no bearer token provided")]
    MissingToken,
    #[error("token signature or structure is invalid")]
    InvalidToken,
    #[error("token has expired")]
    TokenExpired,
    #[error("token subject has no matching identity")]
    UserNotFound,
    #[error("account is deactivated")]
    AccountDeactivated,
    /// Unexpected resolver/verifier failure. The detail is for logs only.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<RepoError> for AuthError {
    fn from(e: RepoError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Deny {
    #[error("role not permitted (allowed: {})", format_roles(.allowed))]
    InsufficientRole { allowed: Vec<Role> },
    #[error("target community differs from the caller's community")]
    CommunityMismatch,
    #[error("resource is not owned by the caller")]
    NotOwner,
}

pub(crate) fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
