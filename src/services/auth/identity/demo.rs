//! In-memory roster used when no live store is configured outside production.
use async_trait::async_trait;

use super::{Identity, IdentityResolver, Role};
use crate::services::auth::error::AuthError;
use crate::services::auth::token_verifier::Claims;

pub const DEMO_ADMIN_ID: &str = "demo-admin-id";
pub const DEMO_USER_ID: &str = "demo-user-id";

/// Two fixed identities, one per role. Read-only after construction.
#[derive(Debug, Clone)]
pub struct DemoRoster {
    entries: [Identity; 2],
}

impl Default for DemoRoster {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoRoster {
    pub fn new() -> Self {
        Self {
            entries: [
                Identity {
                    id: DEMO_ADMIN_ID.to_string(),
                    email: "admin@demo.pickup.local".to_string(),
                    role: Role::Admin,
                    name: "Demo Admin".to_string(),
                    community_ref: None,
                    is_active: true,
                },
                Identity {
                    id: DEMO_USER_ID.to_string(),
                    email: "user@demo.pickup.local".to_string(),
                    role: Role::User,
                    name: "Demo User".to_string(),
                    community_ref: None,
                    is_active: true,
                },
            ],
        }
    }

    pub fn get(&self, subject_id: &str) -> Option<&Identity> {
        self.entries.iter().find(|e| e.id == subject_id)
    }
}

#[async_trait]
impl IdentityResolver for DemoRoster {
    fn strategy_name(&self) -> &'static str {
        "demo"
    }

    async fn resolve(&self, claims: &Claims) -> Result<Identity, AuthError> {
        self.get(&claims.subject_id)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }
}
