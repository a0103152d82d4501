//! Explicit-grant administration
//!
//! Grants give one user one permission on one resource outside the user's
//! role. Issuing or revoking one requires authority over both the grantee
//! and the resource, so a grant can never hand out more than the granter
//! already holds. The caller is resolved through
//! [`Resolver::current_subject`], the same way guards resolve it.

use portal_auth::{AuthContext, AuthError, AuthResult};
use portal_org::{ExplicitGrant, UserId};
use portal_rbac::{Permission, ResourceRef};
use tracing::{error, info};

use crate::error::ResolverError;
use crate::resolver::Resolver;
use crate::store::{AuthorizationStore, GrantStore};

/// Issues, revokes and lists explicit grants.
pub struct GrantAdmin<S: ?Sized> {
    resolver: Resolver<S>,
}

impl<S> GrantAdmin<S>
where
    S: AuthorizationStore + GrantStore + ?Sized,
{
    /// Create a grant administrator.
    pub fn new(resolver: Resolver<S>) -> Self {
        Self { resolver }
    }

    /// Grant `permission` on `resource` to `user_id`.
    ///
    /// Granting the same triple twice keeps a single grant.
    ///
    /// # Errors
    ///
    /// - `SelfManagement` if the granter targets itself
    /// - `AccountDisabled` / `Unauthorized` if the granter is inactive or gone
    /// - `Forbidden` if the granter cannot manage the grantee or does not
    ///   hold the permission on the resource
    /// - `AuthorizationUnavailable` if a lookup or the write fails
    pub async fn grant(
        &self,
        granter: &AuthContext,
        user_id: UserId,
        resource: ResourceRef,
        permission: impl Into<Permission>,
    ) -> AuthResult<ExplicitGrant> {
        let permission = permission.into();
        self.check_authority(granter, user_id, &resource, permission.as_str(), "grant permissions to")
            .await?;

        let grant = ExplicitGrant::new(user_id, resource, permission).with_granted_by(granter.user_id);
        self.resolver
            .store()
            .insert_grant(grant.clone())
            .await
            .map_err(|e| unavailable(e.into()))?;

        info!(
            granted_by = granter.user_id,
            user_id = user_id,
            resource = %resource,
            permission = %grant.permission,
            "Granted permission"
        );
        Ok(grant)
    }

    /// Revoke a grant.
    ///
    /// # Returns
    ///
    /// `true` if a matching grant existed
    pub async fn revoke(
        &self,
        granter: &AuthContext,
        user_id: UserId,
        resource: &ResourceRef,
        permission: &str,
    ) -> AuthResult<bool> {
        self.check_authority(granter, user_id, resource, permission, "revoke permissions from")
            .await?;

        let removed = self
            .resolver
            .store()
            .delete_grant(user_id, resource, permission)
            .await
            .map_err(|e| unavailable(e.into()))?;

        if removed {
            info!(
                revoked_by = granter.user_id,
                user_id = user_id,
                resource = %resource,
                permission = %permission,
                "Revoked permission"
            );
        }
        Ok(removed)
    }

    /// List a user's grants.
    ///
    /// Users may list their own grants; anyone else needs to manage them.
    pub async fn grants_for(&self, viewer: &AuthContext, user_id: UserId) -> AuthResult<Vec<ExplicitGrant>> {
        let viewer = self.resolver.current_subject(viewer).await?;
        if viewer.user_id != user_id
            && !self
                .resolver
                .can_manage_as(&viewer, user_id)
                .await
                .map_err(unavailable)?
        {
            return Err(AuthError::Forbidden);
        }

        self.resolver
            .store()
            .list_grants(user_id)
            .await
            .map_err(|e| unavailable(e.into()))
    }

    async fn check_authority(
        &self,
        granter: &AuthContext,
        user_id: UserId,
        resource: &ResourceRef,
        permission: &str,
        verb: &str,
    ) -> AuthResult<()> {
        if granter.user_id == user_id {
            return Err(AuthError::SelfManagement(verb.to_string()));
        }
        let granter = self.resolver.current_subject(granter).await?;

        let manages = self
            .resolver
            .can_manage_as(&granter, user_id)
            .await
            .map_err(unavailable)?;
        if !manages {
            return Err(AuthError::Forbidden);
        }

        let holds = self
            .resolver
            .authorize(Some(&granter), permission, Some(resource))
            .await
            .map_err(unavailable)?;
        if !holds {
            return Err(AuthError::Forbidden);
        }
        Ok(())
    }
}

fn unavailable(err: ResolverError) -> AuthError {
    error!(error = %err, "Grant administration failed: authorization data unavailable");
    err.into()
}
