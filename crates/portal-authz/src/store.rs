//! Data-source contracts for the resolver
//!
//! The resolver never talks to a database directly. Hosts implement
//! [`AuthorizationStore`] over whatever holds users, the organizational
//! hierarchy and explicit grants; [`GrantStore`] adds the write side used
//! by grant administration.

use std::collections::BTreeSet;

use async_trait::async_trait;
use portal_org::{DepartmentLineage, ExplicitGrant, UserId, UserRecord};
use portal_rbac::{ResourceId, ResourceRef, ResourceType};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Restricts an enumeration of organizational units to one subtree.
///
/// A unit is under a college when it is that college or its lineage leads
/// to it. A unit is under a faculty when it is that faculty or one of its
/// departments. Colleges are never under a faculty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeFilter {
    /// Units owned by a college
    UnderCollege(ResourceId),

    /// Units owned by a faculty
    UnderFaculty(ResourceId),
}

/// Read access to the data the resolver decides on.
///
/// Every method is a point lookup or a filtered enumeration. A lookup that
/// finds nothing returns `Ok(None)`/`Ok(false)`; `Err` is reserved for a
/// source that could not answer.
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    /// Get a user row by ID.
    async fn get_user(&self, user_id: UserId) -> StoreResult<Option<UserRecord>>;

    /// Get the college that owns a faculty.
    async fn get_faculty_college(&self, faculty_id: ResourceId) -> StoreResult<Option<ResourceId>>;

    /// Get the owning faculty and college of a department.
    async fn get_department_lineage(
        &self,
        department_id: ResourceId,
    ) -> StoreResult<Option<DepartmentLineage>>;

    /// Check for an exact `(user, resource, permission)` grant.
    async fn has_explicit_grant(
        &self,
        user_id: UserId,
        resource: &ResourceRef,
        permission: &str,
    ) -> StoreResult<bool>;

    /// Enumerate active units of one organizational type.
    ///
    /// Non-organizational types yield an empty set.
    async fn list_active_resource_ids(
        &self,
        resource_type: ResourceType,
        filter: Option<ScopeFilter>,
    ) -> StoreResult<BTreeSet<ResourceId>>;
}

/// Write access to explicit grants.
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// Store a grant, replacing any grant with the same triple.
    async fn insert_grant(&self, grant: ExplicitGrant) -> StoreResult<()>;

    /// Remove a grant.
    ///
    /// # Returns
    ///
    /// `true` if a grant was removed
    async fn delete_grant(
        &self,
        user_id: UserId,
        resource: &ResourceRef,
        permission: &str,
    ) -> StoreResult<bool>;

    /// List every grant held by a user.
    async fn list_grants(&self, user_id: UserId) -> StoreResult<Vec<ExplicitGrant>>;
}
