use std::sync::Arc;
use std::time::Duration;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::error::AuthError;
use crate::services::auth::guards::{Guard, GuardChain};
use crate::services::auth::identity::{Identity, IdentityResolver};
use crate::services::auth::resource::ResourceDescriptor;
use crate::services::auth::token_verifier::TokenVerifier;

/// Bearer token → identity → guard chain.
///
/// Built once at startup and shared by every request; holds no mutable state.
#[derive(Clone)]
pub struct AuthService {
    verifier: TokenVerifier,
    resolver: Arc<dyn IdentityResolver>,
    lookup_timeout: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("verifier", &self.verifier)
            .field("strategy", &self.resolver.strategy_name())
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        verifier: TokenVerifier,
        resolver: Arc<dyn IdentityResolver>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            verifier,
            resolver,
            lookup_timeout,
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.resolver.strategy_name()
    }

    /// Verify the `Authorization` header and resolve the caller.
    ///
    /// The identity lookup is the only await point. It is bounded by the
    /// lookup timeout and is abandoned if the request future is dropped.
    pub async fn authenticate(&self, header_value: Option<&str>) -> Result<Identity, AuthError> {
        let claims = self.verifier.verify(header_value)?;

        let identity = tokio::time::timeout(self.lookup_timeout, self.resolver.resolve(&claims))
            .await
            .map_err(|_| {
                AuthError::Internal(format!(
                    "{} identity lookup exceeded {:?}",
                    self.resolver.strategy_name(),
                    self.lookup_timeout
                ))
            })??;

        // No resolver may hand an inactive identity to the guards.
        if !identity.is_active {
            return Err(AuthError::AccountDeactivated);
        }

        Ok(identity)
    }

    /// Run the whole pipeline for one request.
    pub async fn authorize(
        &self,
        chain: &GuardChain,
        header_value: Option<&str>,
        resource: &ResourceDescriptor,
    ) -> Result<AuthCtx, AppError> {
        let ctx = self.establish(chain, header_value).await?;
        self.check(chain, &ctx, resource)?;
        Ok(ctx)
    }

    /// Build the request context.
    ///
    /// Authentication failures end the request unless the chain contains
    /// `OptionalAuth`, in which case the caller continues anonymously.
    pub async fn establish(
        &self,
        chain: &GuardChain,
        header_value: Option<&str>,
    ) -> Result<AuthCtx, AppError> {
        let identity = match self.authenticate(header_value).await {
            Ok(identity) => Some(identity),
            Err(err) if chain.is_optional() => {
                match &err {
                    AuthError::Internal(detail) => tracing::error!(
                        detail = %detail,
                        "optional auth: lookup failed, continuing anonymously"
                    ),
                    _ => tracing::debug!(error = %err, "optional auth: continuing anonymously"),
                }
                None
            }
            Err(AuthError::Internal(detail)) => {
                tracing::error!(detail = %detail, "authentication failed unexpectedly");
                return Err(AppError::Internal);
            }
            Err(err) => {
                tracing::warn!(error = %err, "authentication failed");
                return Err(AppError::Unauthorized(err));
            }
        };

        Ok(AuthCtx::new(identity))
    }

    /// Evaluate the guard chain against an established context.
    pub fn check(
        &self,
        chain: &GuardChain,
        ctx: &AuthCtx,
        resource: &ResourceDescriptor,
    ) -> Result<(), AppError> {
        let Err((guard, deny)) = chain.evaluate(ctx, resource) else {
            return Ok(());
        };

        match guard {
            Guard::MultiRole(g) => tracing::info!(
                guard = guard.name(),
                user_id = ctx.user_id().unwrap_or("-"),
                reason = %deny,
                "{}", g.message()
            ),
            _ => tracing::info!(
                guard = guard.name(),
                user_id = ctx.user_id().unwrap_or("-"),
                reason = %deny,
                "access denied"
            ),
        }

        Err(AppError::Forbidden(deny))
    }
}
