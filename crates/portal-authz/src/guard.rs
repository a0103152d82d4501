//! Request guards
//!
//! Guards sit in front of handler bodies. Each check either returns
//! `Ok(())` or an [`AuthError`] the host turns into a response; a resolver
//! fault is always a rejection.
//!
//! # Example
//!
//! ```rust,ignore
//! guard.require(&ctx, permissions::NEWS_CREATE, None).await?;
//! guard.require_manage_user(&ctx, target_id, UserAction::Delete).await?;
//! ```

use std::future::Future;

use portal_auth::{AuthContext, AuthError, AuthResult};
use portal_org::UserId;
use portal_rbac::ResourceRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::ResolverError;
use crate::resolver::Resolver;
use crate::store::AuthorizationStore;

/// An action on another user's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    /// Read the account
    View,
    /// Edit profile, role or attachments
    Update,
    /// Disable the account
    Deactivate,
    /// Remove the account
    Delete,
}

impl UserAction {
    /// Check if the action may never target the caller's own account.
    pub fn is_self_protected(&self) -> bool {
        matches!(self, UserAction::Deactivate | UserAction::Delete)
    }

    /// Get the verb used in messages.
    pub fn verb(&self) -> &'static str {
        match self {
            UserAction::View => "view",
            UserAction::Update => "update",
            UserAction::Deactivate => "deactivate",
            UserAction::Delete => "delete",
        }
    }
}

/// Guard checks backed by a [`Resolver`].
pub struct Guard<S: ?Sized> {
    resolver: Resolver<S>,
}

impl<S: ?Sized> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
        }
    }
}

impl<S> Guard<S>
where
    S: AuthorizationStore + ?Sized,
{
    /// Create a guard.
    pub fn new(resolver: Resolver<S>) -> Self {
        Self { resolver }
    }

    /// Get the underlying resolver.
    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    /// Require a permission, optionally on one resource.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` / `AccountDisabled` if the subject is gone or inactive
    /// - `Forbidden` if the resolver denies
    /// - `AuthorizationUnavailable` if a lookup fails
    pub async fn require(
        &self,
        ctx: &AuthContext,
        permission: &str,
        resource: Option<&ResourceRef>,
    ) -> AuthResult<()> {
        let subject = self.resolver.current_subject(ctx).await?;

        let allowed = self
            .resolver
            .authorize(Some(&subject), permission, resource)
            .await
            .map_err(unavailable)?;

        if allowed {
            Ok(())
        } else {
            debug!(
                user_id = subject.user_id,
                permission = %permission,
                resource = ?resource,
                "Permission denied"
            );
            Err(AuthError::Forbidden)
        }
    }

    /// Require an admin role.
    pub async fn require_admin(&self, ctx: &AuthContext) -> AuthResult<()> {
        let subject = self.resolver.current_subject(ctx).await?;
        if subject.role.is_admin() {
            Ok(())
        } else {
            debug!(user_id = subject.user_id, role = %subject.role, "Admin role required");
            Err(AuthError::AdminRequired)
        }
    }

    /// Require that the caller may perform `action` on another user.
    ///
    /// Deactivating or deleting one's own account is rejected for every
    /// role, super admins included.
    pub async fn require_manage_user(
        &self,
        ctx: &AuthContext,
        target_id: UserId,
        action: UserAction,
    ) -> AuthResult<()> {
        if ctx.user_id == target_id && action.is_self_protected() {
            return Err(AuthError::SelfManagement(action.verb().to_string()));
        }

        let subject = self.resolver.current_subject(ctx).await?;
        let allowed = self
            .resolver
            .can_manage_as(&subject, target_id)
            .await
            .map_err(unavailable)?;

        if allowed {
            Ok(())
        } else {
            debug!(
                user_id = subject.user_id,
                target_id = target_id,
                action = action.verb(),
                "User management denied"
            );
            Err(AuthError::Forbidden)
        }
    }

    /// Run `handler` only if `permission` is granted.
    pub async fn guarded<F, Fut, T>(
        &self,
        ctx: &AuthContext,
        permission: &str,
        resource: Option<&ResourceRef>,
        handler: F,
    ) -> AuthResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AuthResult<T>>,
    {
        self.require(ctx, permission, resource).await?;
        handler().await
    }
}

fn unavailable(err: ResolverError) -> AuthError {
    error!(error = %err, "Rejecting request: authorization data unavailable");
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_protected_actions() {
        assert!(UserAction::Delete.is_self_protected());
        assert!(UserAction::Deactivate.is_self_protected());
        assert!(!UserAction::Update.is_self_protected());
        assert!(!UserAction::View.is_self_protected());
    }

    #[test]
    fn test_self_management_message() {
        let err = AuthError::SelfManagement(UserAction::Deactivate.verb().to_string());
        assert_eq!(err.to_string(), "Cannot deactivate your own account");
    }
}
