//! Identity lookup against the persistent users table.
use async_trait::async_trait;
use sqlx::PgPool;

use super::{Identity, IdentityResolver, Role};
use crate::repos::user_repo::{self, UserRow};
use crate::services::auth::error::AuthError;
use crate::services::auth::token_verifier::Claims;

#[derive(Clone, Debug)]
pub struct LiveResolver {
    db: PgPool,
}

impl LiveResolver {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityResolver for LiveResolver {
    fn strategy_name(&self) -> &'static str {
        "live"
    }

    async fn resolve(&self, claims: &Claims) -> Result<Identity, AuthError> {
        let row = user_repo::find_identity(&self.db, &claims.subject_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        project(row)
    }
}

/// Project a stored row into an `Identity`, refusing deactivated accounts.
pub(crate) fn project(row: UserRow) -> Result<Identity, AuthError> {
    if !row.is_active {
        return Err(AuthError::AccountDeactivated);
    }

    let role = row
        .role
        .parse::<Role>()
        .map_err(|e| AuthError::Internal(format!("user {} has unknown role {:?}", row.id, e.0)))?;

    Ok(Identity {
        id: row.id,
        email: row.email,
        role,
        name: row.name,
        community_ref: row.community_ref,
        is_active: true,
    })
}
