/*
 * Responsibility
 * - Authorization predicates evaluated against a RequestContext + ResourceDescriptor
 * - Each guard is a variant of `Guard`; a route is protected by an ordered `GuardChain`
 * - Guards are pure: no I/O, no mutation of the context
 */
use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::error::{Deny, format_roles};
use crate::services::auth::identity::Role;
use crate::services::auth::resource::{
    COMMUNITY_PRECEDENCE, OWNER_PRECEDENCE, ResourceDescriptor,
};

pub type Decision = Result<(), Deny>;

/// Field names that may carry the target community id.
const COMMUNITY_FIELDS: [&str; 2] = ["communityId", "community"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGuard {
    allowed: Vec<Role>,
}

impl RoleGuard {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn evaluate(&self, ctx: &AuthCtx) -> Decision {
        match ctx.identity() {
            Some(identity) if self.allowed.contains(&identity.role) => Ok(()),
            _ => Err(Deny::InsufficientRole {
                allowed: self.allowed.clone(),
            }),
        }
    }
}

/// `RoleGuard` with a diagnostic message naming the allowed roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiRoleGuard {
    inner: RoleGuard,
    message: String,
}

impl MultiRoleGuard {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        let inner = RoleGuard::new(allowed);
        let message = format!("requires one of: {}", format_roles(&inner.allowed));
        Self { inner, message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn evaluate(&self, ctx: &AuthCtx) -> Decision {
        self.inner.evaluate(ctx)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommunityGuard;

impl CommunityGuard {
    pub fn evaluate(&self, ctx: &AuthCtx, resource: &ResourceDescriptor) -> Decision {
        let Some(identity) = ctx.identity() else {
            return Err(Deny::CommunityMismatch);
        };
        if identity.is_admin() {
            return Ok(());
        }

        match resource.lookup_any(&COMMUNITY_FIELDS, COMMUNITY_PRECEDENCE) {
            None => Ok(()),
            Some(target) if identity.community_ref.as_deref() == Some(target.as_str()) => Ok(()),
            Some(_) => Err(Deny::CommunityMismatch),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipGuard {
    owner_field: String,
}

impl OwnershipGuard {
    pub fn new(owner_field: impl Into<String>) -> Self {
        Self {
            owner_field: owner_field.into(),
        }
    }

    pub fn evaluate(&self, ctx: &AuthCtx, resource: &ResourceDescriptor) -> Decision {
        let Some(identity) = ctx.identity() else {
            return Err(Deny::NotOwner);
        };
        if identity.is_admin() {
            return Ok(());
        }

        match resource.lookup(&self.owner_field, OWNER_PRECEDENCE) {
            None => Ok(()),
            Some(owner) if owner == identity.id => Ok(()),
            Some(_) => Err(Deny::NotOwner),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Never denies. Its presence makes the chain tolerate authentication failures.
    OptionalAuth,
    Role(RoleGuard),
    MultiRole(MultiRoleGuard),
    Community(CommunityGuard),
    Ownership(OwnershipGuard),
}

impl Guard {
    pub fn role(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self::Role(RoleGuard::new(allowed))
    }

    pub fn multi_role(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self::MultiRole(MultiRoleGuard::new(allowed))
    }

    pub fn community() -> Self {
        Self::Community(CommunityGuard)
    }

    pub fn ownership(owner_field: impl Into<String>) -> Self {
        Self::Ownership(OwnershipGuard::new(owner_field))
    }

    pub fn evaluate(&self, ctx: &AuthCtx, resource: &ResourceDescriptor) -> Decision {
        match self {
            Guard::OptionalAuth => Ok(()),
            Guard::Role(g) => g.evaluate(ctx),
            Guard::MultiRole(g) => g.evaluate(ctx),
            Guard::Community(g) => g.evaluate(ctx, resource),
            Guard::Ownership(g) => g.evaluate(ctx, resource),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Guard::OptionalAuth => "optional_auth",
            Guard::Role(_) => "role",
            Guard::MultiRole(_) => "multi_role",
            Guard::Community(_) => "community",
            Guard::Ownership(_) => "ownership",
        }
    }

    // Guards that read request fields need the body buffered.
    fn needs_resource(&self) -> bool {
        matches!(self, Guard::Community(_) | Guard::Ownership(_))
    }
}

/// Ordered guards; evaluation stops at the first deny.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardChain {
    guards: Vec<Guard>,
}

impl GuardChain {
    pub fn new(guards: impl IntoIterator<Item = Guard>) -> Self {
        Self {
            guards: guards.into_iter().collect(),
        }
    }

    /// Authenticated identity required, no further checks.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn optional() -> Self {
        Self::new([Guard::OptionalAuth])
    }

    pub fn then(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn is_optional(&self) -> bool {
        self.guards.contains(&Guard::OptionalAuth)
    }

    pub fn needs_resource(&self) -> bool {
        self.guards.iter().any(Guard::needs_resource)
    }

    /// Evaluate left to right. On deny, returns the guard that denied too.
    pub fn evaluate<'a>(
        &'a self,
        ctx: &AuthCtx,
        resource: &ResourceDescriptor,
    ) -> Result<(), (&'a Guard, Deny)> {
        for guard in &self.guards {
            guard.evaluate(ctx, resource).map_err(|deny| (guard, deny))?;
        }
        Ok(())
    }
}
