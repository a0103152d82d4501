//! # Permissions
//!
//! Permission tokens for the portal RBAC system.
//!
//! A permission token is an opaque string naming an action class
//! (e.g. `news_edit`). Tokens match by exact equality; the wildcard token
//! [`ALL`] satisfies every requirement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wildcard token: holding it satisfies any permission.
pub const ALL: &str = "all";

// =============================================================================
// Organizational unit permissions
// =============================================================================

/// Full management of a college.
pub const COLLEGE_MANAGE: &str = "college_manage";
/// Full management of faculties.
pub const FACULTY_MANAGE: &str = "faculty_manage";
/// Read faculty details.
pub const FACULTY_READ: &str = "faculty_read";
/// Edit faculty details.
pub const FACULTY_EDIT: &str = "faculty_edit";
/// Full management of departments.
pub const DEPARTMENT_MANAGE: &str = "department_manage";
/// Read department details.
pub const DEPARTMENT_READ: &str = "department_read";
/// Edit department details.
pub const DEPARTMENT_EDIT: &str = "department_edit";

// =============================================================================
// User and content permissions
// =============================================================================

/// Manage portal user accounts.
pub const USER_MANAGE: &str = "user_manage";
/// Full management of news items.
pub const NEWS_MANAGE: &str = "news_manage";
/// Create news items.
pub const NEWS_CREATE: &str = "news_create";
/// Edit news items.
pub const NEWS_EDIT: &str = "news_edit";
/// Manage uploaded files.
pub const FILES_MANAGE: &str = "files_manage";
/// Upload files.
pub const FILES_UPLOAD: &str = "files_upload";

// =============================================================================
// AI House and incubator permissions
// =============================================================================

/// Manage the AI House section.
pub const AI_HOUSE_MANAGE: &str = "ai_house_manage";
/// Manage AI House projects.
pub const PROJECTS_MANAGE: &str = "projects_manage";
/// Manage AI House events.
pub const EVENTS_MANAGE: &str = "events_manage";
/// Manage the incubator section.
pub const INCUBATOR_MANAGE: &str = "incubator_manage";
/// Manage incubated startups.
pub const STARTUPS_MANAGE: &str = "startups_manage";
/// Manage incubator programs.
pub const PROGRAMS_MANAGE: &str = "programs_manage";

/// Read-only access to the admin area.
pub const READ_ONLY: &str = "read_only";

/// Check if a held token satisfies a required one.
///
/// Matching is exact and case-sensitive; the wildcard satisfies everything.
///
/// # Example
///
/// ```
/// use portal_rbac::permissions::{satisfies, ALL, NEWS_CREATE, NEWS_EDIT};
///
/// assert!(satisfies(NEWS_EDIT, NEWS_EDIT));
/// assert!(!satisfies(NEWS_EDIT, NEWS_CREATE));
/// assert!(satisfies(ALL, NEWS_CREATE));
/// ```
pub fn satisfies(held: &str, required: &str) -> bool {
    held == ALL || held == required
}

/// A single permission token, as stored on an explicit grant.
///
/// # Example
///
/// ```
/// use portal_rbac::permissions::{Permission, NEWS_EDIT};
///
/// let perm = Permission::from(NEWS_EDIT);
/// assert_eq!(perm.as_str(), "news_edit");
/// assert_eq!(perm.to_string(), "news_edit");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Create a permission from a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Permission {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Permission {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(satisfies(NEWS_EDIT, NEWS_EDIT));
        assert!(!satisfies(NEWS_EDIT, NEWS_CREATE));
        assert!(!satisfies(NEWS_EDIT, "news_edi"));
    }

    #[test]
    fn test_wildcard() {
        assert!(satisfies(ALL, COLLEGE_MANAGE));
        assert!(satisfies(ALL, "not_a_known_token"));
        // Only the held side expands
        assert!(!satisfies(USER_MANAGE, ALL));
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert!(!satisfies(NEWS_EDIT, "NEWS_EDIT"));
        assert!(!satisfies("ALL", NEWS_EDIT));
    }

    #[test]
    fn test_permission_serializes_as_plain_string() {
        let json = serde_json::to_string(&Permission::new(NEWS_EDIT)).unwrap();
        assert_eq!(json, "\"news_edit\"");

        let back: Permission = serde_json::from_str("\"files_manage\"").unwrap();
        assert_eq!(back.as_str(), FILES_MANAGE);
    }
}
