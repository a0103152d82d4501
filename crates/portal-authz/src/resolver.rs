//! Authorization resolver
//!
//! Decides whether a subject may perform a permission, optionally on one
//! resource instance, by combining role defaults, explicit grants and
//! organizational scope.
//!
//! # Decision order
//!
//! 1. An inactive or absent subject is denied.
//! 2. A super admin is allowed.
//! 3. A role default (or the `all` wildcard) allows. Scoped admin roles do
//!    not reach across the organizational tree through defaults: when the
//!    request names a college, faculty or department their default is
//!    skipped and scope decides.
//! 4. An explicit grant on the exact resource allows.
//! 5. An organizational resource inside the subject's scope allows.
//! 6. Anything else is denied.
//!
//! Each scoped role is anchored to one attachment (see
//! [`Role::scope`](portal_rbac::Role::scope)); attachments other than the
//! anchor never widen its reach, except that a faculty admin may act on its
//! own college.

use std::collections::BTreeSet;
use std::sync::Arc;

use portal_auth::{AuthContext, AuthError, AuthResult};
use portal_org::UserId;
use portal_rbac::{ResourceId, ResourceRef, ResourceType, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::config::ResolverConfig;
use crate::error::ResolverResult;
use crate::store::{AuthorizationStore, ScopeFilter};

/// The rule that settled a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Subject is a super admin
    SuperAdmin,
    /// Permission is a default of the subject's role
    RoleDefault,
    /// Subject holds an explicit grant on the resource
    ExplicitGrant,
    /// Resource lies inside the subject's organizational scope
    Hierarchy,
    /// No rule allowed
    Denied,
}

impl Decision {
    /// Check if the decision allows the request.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Decision::Denied)
    }
}

/// The authorization resolver.
///
/// Read-only: it holds no state besides its store handle and settings, so
/// one instance can serve every request concurrently.
pub struct Resolver<S: ?Sized> {
    store: Arc<S>,
    config: ResolverConfig,
}

impl<S: ?Sized> Clone for Resolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config,
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for Resolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish()
    }
}

impl<S> Resolver<S>
where
    S: AuthorizationStore + ?Sized,
{
    /// Create a resolver with default settings.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    /// Create a resolver with explicit settings.
    pub fn with_config(store: Arc<S>, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    /// Get the backing store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Get the settings.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Decide whether `subject` may perform `permission`.
    ///
    /// # Arguments
    ///
    /// * `subject` - The requesting user, `None` when unauthenticated
    /// * `permission` - Permission token
    /// * `resource` - Optional resource instance the request targets
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` when a lookup fails. Callers must treat it as
    /// a denial.
    #[instrument(skip(self), level = "debug")]
    pub async fn authorize(
        &self,
        subject: Option<&AuthContext>,
        permission: &str,
        resource: Option<&ResourceRef>,
    ) -> ResolverResult<bool> {
        Ok(self.explain(subject, permission, resource).await?.is_allowed())
    }

    /// Like [`authorize`](Self::authorize), returning the rule that decided.
    pub async fn explain(
        &self,
        subject: Option<&AuthContext>,
        permission: &str,
        resource: Option<&ResourceRef>,
    ) -> ResolverResult<Decision> {
        let decision = self
            .evaluate(subject, permission, resource)
            .await
            .map_err(|e| {
                error!(error = %e, permission = %permission, "Authorization lookup failed");
                e
            })?;

        if self.config.log_decisions {
            debug!(
                user_id = ?subject.map(|s| s.user_id),
                permission = %permission,
                resource = ?resource,
                decision = ?decision,
                "Authorization decision"
            );
        }

        Ok(decision)
    }

    /// Decide for a user ID, reading the user row first.
    ///
    /// An absent user, or one whose stored role is unknown, is denied.
    #[instrument(skip(self), level = "debug")]
    pub async fn authorize_user(
        &self,
        user_id: UserId,
        permission: &str,
        resource: Option<&ResourceRef>,
    ) -> ResolverResult<bool> {
        let subject = self.load_subject(user_id).await?;
        self.authorize(subject.as_ref(), permission, resource).await
    }

    /// Decide for a user ID with an untyped resource reference.
    ///
    /// The reference is only used when both parts are present. An unknown
    /// resource type denies everyone below super admin.
    pub async fn authorize_raw(
        &self,
        user_id: UserId,
        permission: &str,
        resource_type: Option<&str>,
        resource_id: Option<ResourceId>,
    ) -> ResolverResult<bool> {
        let subject = self.load_subject(user_id).await?;

        let resource = match (resource_type, resource_id) {
            (Some(kind), Some(id)) => match ResourceRef::parse(kind, id) {
                Some(resource) => Some(resource),
                None => {
                    debug!(resource_type = %kind, "Unknown resource type");
                    return Ok(subject.is_some_and(|s| s.is_super_admin()));
                }
            },
            _ => None,
        };

        self.authorize(subject.as_ref(), permission, resource.as_ref())
            .await
    }

    /// Read a user row and build its context.
    ///
    /// # Returns
    ///
    /// `None` if the user does not exist or its stored role is unknown
    pub async fn load_subject(&self, user_id: UserId) -> ResolverResult<Option<AuthContext>> {
        let Some(record) = self.store.get_user(user_id).await? else {
            return Ok(None);
        };

        let context = AuthContext::from_record(&record);
        if context.is_none() {
            warn!(user_id = user_id, role = %record.role, "Stored user has an unknown role");
        }
        Ok(context)
    }

    /// Resolve the subject a request acts as.
    ///
    /// With `refresh_subject` set the stored row replaces the token
    /// context, so deactivation and role changes apply before the token
    /// expires. Otherwise the token context is used as is.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the user no longer exists (or its role is unknown)
    /// - `AccountDisabled` if the account is inactive
    /// - `AuthorizationUnavailable` if the user row cannot be read
    pub async fn current_subject(&self, ctx: &AuthContext) -> AuthResult<AuthContext> {
        let subject = if self.config.refresh_subject {
            self.load_subject(ctx.user_id)
                .await
                .map_err(|e| {
                    error!(error = %e, user_id = ctx.user_id, "Failed to refresh subject");
                    AuthError::from(e)
                })?
                .ok_or_else(|| AuthError::Unauthorized("Unknown user".to_string()))?
        } else {
            *ctx
        };

        if !subject.is_active {
            return Err(AuthError::AccountDisabled);
        }
        Ok(subject)
    }

    /// List the IDs of one organizational unit type the subject administers.
    ///
    /// Only active units are enumerated, for super admins and scoped admins
    /// alike; an inactive unit stays reachable through [`Resolver::authorize`]
    /// but is never listed. A scoped admin's own anchor unit is returned as
    /// is without a lookup. Non-organizational types, inactive subjects and
    /// unscoped roles yield an empty set.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_accessible(
        &self,
        subject: Option<&AuthContext>,
        resource_type: ResourceType,
    ) -> ResolverResult<BTreeSet<ResourceId>> {
        let Some(subject) = subject.filter(|s| s.is_active) else {
            return Ok(BTreeSet::new());
        };
        if !resource_type.is_organizational() {
            return Ok(BTreeSet::new());
        }

        let ids = match subject.role {
            Role::SuperAdmin => {
                self.store
                    .list_active_resource_ids(resource_type, None)
                    .await?
            }
            Role::CollegeAdmin => match (subject.college_id, resource_type) {
                (None, _) => BTreeSet::new(),
                (Some(college_id), ResourceType::College) => BTreeSet::from([college_id]),
                (Some(college_id), _) => {
                    self.store
                        .list_active_resource_ids(
                            resource_type,
                            Some(ScopeFilter::UnderCollege(college_id)),
                        )
                        .await?
                }
            },
            Role::FacultyAdmin => match (subject.faculty_id, resource_type) {
                (Some(faculty_id), ResourceType::Faculty) => BTreeSet::from([faculty_id]),
                (Some(faculty_id), ResourceType::Department) => {
                    self.store
                        .list_active_resource_ids(
                            resource_type,
                            Some(ScopeFilter::UnderFaculty(faculty_id)),
                        )
                        .await?
                }
                _ => BTreeSet::new(),
            },
            Role::DepartmentAdmin => match (subject.department_id, resource_type) {
                (Some(department_id), ResourceType::Department) => {
                    BTreeSet::from([department_id])
                }
                _ => BTreeSet::new(),
            },
            _ => BTreeSet::new(),
        };

        Ok(ids)
    }

    /// List accessible units for a user ID, reading the user row first.
    pub async fn list_accessible_for_user(
        &self,
        user_id: UserId,
        resource_type: ResourceType,
    ) -> ResolverResult<BTreeSet<ResourceId>> {
        let subject = self.load_subject(user_id).await?;
        self.list_accessible(subject.as_ref(), resource_type).await
    }

    /// Check whether one user may administer another.
    ///
    /// A super admin manages anyone. A college admin manages users in its
    /// college and a faculty admin users in its faculty. Nobody else manages
    /// anyone, and no one below super admin manages itself.
    #[instrument(skip(self), level = "debug")]
    pub async fn can_manage(&self, manager_id: UserId, target_id: UserId) -> ResolverResult<bool> {
        let Some(manager) = self.load_subject(manager_id).await? else {
            return Ok(false);
        };
        self.can_manage_as(&manager, target_id).await
    }

    /// Like [`can_manage`](Self::can_manage) with an already built manager
    /// context.
    pub async fn can_manage_as(
        &self,
        manager: &AuthContext,
        target_id: UserId,
    ) -> ResolverResult<bool> {
        if !manager.is_active {
            return Ok(false);
        }
        let Some(target) = self.store.get_user(target_id).await? else {
            return Ok(false);
        };
        if manager.role == Role::SuperAdmin {
            return Ok(true);
        }
        if manager.user_id == target_id {
            return Ok(false);
        }

        let shared = match manager.role {
            Role::CollegeAdmin => manager.college_id.is_some() && manager.college_id == target.college_id,
            Role::FacultyAdmin => manager.faculty_id.is_some() && manager.faculty_id == target.faculty_id,
            _ => false,
        };
        Ok(shared)
    }

    async fn evaluate(
        &self,
        subject: Option<&AuthContext>,
        permission: &str,
        resource: Option<&ResourceRef>,
    ) -> ResolverResult<Decision> {
        let Some(subject) = subject.filter(|s| s.is_active) else {
            return Ok(Decision::Denied);
        };
        if subject.role == Role::SuperAdmin {
            return Ok(Decision::SuperAdmin);
        }

        let scoped_request =
            subject.role.is_scoped() && resource.is_some_and(|r| r.is_organizational());
        if !scoped_request && subject.role.grants(permission) {
            return Ok(Decision::RoleDefault);
        }

        let Some(resource) = resource else {
            return Ok(Decision::Denied);
        };

        if self
            .store
            .has_explicit_grant(subject.user_id, resource, permission)
            .await?
        {
            return Ok(Decision::ExplicitGrant);
        }

        if resource.is_organizational() && self.in_scope(subject, resource).await? {
            return Ok(Decision::Hierarchy);
        }

        Ok(Decision::Denied)
    }

    /// Check whether an organizational unit lies inside the subject's scope.
    async fn in_scope(&self, subject: &AuthContext, resource: &ResourceRef) -> ResolverResult<bool> {
        let id = resource.resource_id;

        match (resource.resource_type, subject.role) {
            (ResourceType::College, Role::CollegeAdmin | Role::FacultyAdmin) => {
                Ok(subject.college_id == Some(id))
            }

            (ResourceType::Faculty, Role::CollegeAdmin) => {
                let Some(college_id) = subject.college_id else {
                    return Ok(false);
                };
                let owner = self.store.get_faculty_college(id).await?;
                Ok(owner == Some(college_id))
            }
            (ResourceType::Faculty, Role::FacultyAdmin) => Ok(subject.faculty_id == Some(id)),

            (ResourceType::Department, Role::DepartmentAdmin) => {
                Ok(subject.department_id == Some(id))
            }
            (ResourceType::Department, Role::CollegeAdmin | Role::FacultyAdmin) => {
                let Some(anchor) = subject.anchor() else {
                    return Ok(false);
                };
                let Some(lineage) = self.store.get_department_lineage(id).await? else {
                    return Ok(false);
                };
                Ok(match anchor {
                    (ResourceType::College, college_id) => lineage.college_id == college_id,
                    (ResourceType::Faculty, faculty_id) => lineage.faculty_id == faculty_id,
                    _ => false,
                })
            }

            _ => Ok(false),
        }
    }
}
