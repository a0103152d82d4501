//! Explicit permission grants
//!
//! A grant gives one user one permission on one resource instance,
//! independently of the user's role defaults.

use chrono::{DateTime, Utc};
use portal_rbac::{Permission, ResourceRef};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// A stored explicit grant.
///
/// # Examples
///
/// ```
/// use portal_org::ExplicitGrant;
/// use portal_rbac::ResourceRef;
///
/// let grant = ExplicitGrant::new(5, ResourceRef::department(42), "files_manage")
///     .with_granted_by(1);
/// assert!(grant.matches(5, &ResourceRef::department(42), "files_manage"));
/// assert!(!grant.matches(5, &ResourceRef::department(43), "files_manage"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplicitGrant {
    /// Grantee
    pub user_id: UserId,

    /// The resource instance the grant applies to
    pub resource: ResourceRef,

    /// The granted permission token
    pub permission: Permission,

    /// Who issued the grant
    pub granted_by: Option<UserId>,

    /// When the grant was created
    pub created_at: DateTime<Utc>,
}

impl ExplicitGrant {
    /// Creates a new grant.
    pub fn new(user_id: UserId, resource: ResourceRef, permission: impl Into<Permission>) -> Self {
        Self {
            user_id,
            resource,
            permission: permission.into(),
            granted_by: None,
            created_at: Utc::now(),
        }
    }

    /// Record who issued the grant.
    pub fn with_granted_by(mut self, granter_id: UserId) -> Self {
        self.granted_by = Some(granter_id);
        self
    }

    /// Check if this grant is the exact `(user, resource, permission)` triple.
    ///
    /// Grants never expand the wildcard: a grant of `all` only matches a
    /// request for the literal token `all`.
    pub fn matches(&self, user_id: UserId, resource: &ResourceRef, permission: &str) -> bool {
        self.user_id == user_id
            && self.resource == *resource
            && self.permission.as_str() == permission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_rbac::ResourceType;

    #[test]
    fn test_grant_matching_is_exact() {
        let grant = ExplicitGrant::new(5, ResourceRef::department(42), "files_manage");

        assert!(grant.matches(5, &ResourceRef::department(42), "files_manage"));
        assert!(!grant.matches(6, &ResourceRef::department(42), "files_manage"));
        assert!(!grant.matches(5, &ResourceRef::faculty(42), "files_manage"));
        assert!(!grant.matches(5, &ResourceRef::department(42), "files_upload"));
    }

    #[test]
    fn test_wildcard_grant_is_literal() {
        let grant = ExplicitGrant::new(5, ResourceRef::new(ResourceType::News, 1), "all");
        assert!(!grant.matches(5, &ResourceRef::new(ResourceType::News, 1), "news_edit"));
    }

    #[test]
    fn test_granted_by() {
        let grant = ExplicitGrant::new(5, ResourceRef::college(1), "college_manage").with_granted_by(1);
        assert_eq!(grant.granted_by, Some(1));
    }
}
