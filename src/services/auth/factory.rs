//! Factory: build `AuthService` from application `Config`.
//!
//! This is the only place the identity strategy is decided.
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, IdentitySource};
use crate::services::auth::identity::{DemoRoster, IdentityResolver, LiveResolver};
use crate::services::auth::{AuthService, TokenVerifier};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, sqlx::Error> {
    let verifier = TokenVerifier::new(&config.jwt_secret, config.access_token_leeway_seconds);

    let resolver: Arc<dyn IdentityResolver> = match &config.identity_source {
        IdentitySource::Live { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(config.identity_lookup_timeout)
                .connect_lazy(database_url)?;
            Arc::new(LiveResolver::new(pool))
        }
        IdentitySource::Demo => {
            tracing::warn!("no DATABASE_URL configured; using the demo identity roster");
            Arc::new(DemoRoster::new())
        }
    };

    Ok(Arc::new(AuthService::new(
        verifier,
        resolver,
        config.identity_lookup_timeout,
    )))
}
