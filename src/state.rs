/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - auth: AuthService (verifier + identity resolver chosen at startup)
 * - Cheap to clone (Arc inside); nothing in here is mutated after startup
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}
