//! Portal roles
//!
//! This module defines the fixed role enumeration and the static
//! role → permission table.

use serde::{Deserialize, Serialize};

use crate::permissions;
use crate::resources::ResourceType;

/// Role of a portal user.
///
/// Every role maps to a fixed set of permission tokens
/// ([`Role::default_permissions`]). `SuperAdmin` holds the wildcard.
///
/// # Permission Model
///
/// - **SuperAdmin**: everything
/// - **CollegeAdmin / FacultyAdmin / DepartmentAdmin**: scoped roles, each
///   anchored to one organizational attachment of the user
/// - **AiHouseAdmin / IncubatorAdmin**: section administrators
/// - **Editor**: content authoring
/// - **Viewer**: read-only
///
/// # Examples
///
/// ```
/// use portal_rbac::Role;
///
/// let role = Role::DepartmentAdmin;
/// assert!(role.grants("department_edit"));
/// assert!(!role.grants("college_manage"));
/// assert!(Role::SuperAdmin.grants("anything"));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unrestricted portal administrator
    SuperAdmin,

    /// Administrator of one college and everything under it
    CollegeAdmin,

    /// Administrator of one faculty and its departments
    FacultyAdmin,

    /// Administrator of one department
    DepartmentAdmin,

    /// Administrator of the AI House section
    AiHouseAdmin,

    /// Administrator of the incubator section
    IncubatorAdmin,

    /// Content editor
    Editor,

    /// Read-only user
    Viewer,
}

const SUPER_ADMIN_PERMISSIONS: &[&str] = &[permissions::ALL];

const COLLEGE_ADMIN_PERMISSIONS: &[&str] = &[
    permissions::COLLEGE_MANAGE,
    permissions::FACULTY_MANAGE,
    permissions::DEPARTMENT_MANAGE,
    permissions::USER_MANAGE,
    permissions::NEWS_MANAGE,
    permissions::FILES_MANAGE,
];

const FACULTY_ADMIN_PERMISSIONS: &[&str] = &[
    permissions::FACULTY_READ,
    permissions::FACULTY_EDIT,
    permissions::DEPARTMENT_MANAGE,
    permissions::NEWS_MANAGE,
    permissions::FILES_MANAGE,
];

const DEPARTMENT_ADMIN_PERMISSIONS: &[&str] = &[
    permissions::DEPARTMENT_READ,
    permissions::DEPARTMENT_EDIT,
    permissions::NEWS_CREATE,
    permissions::NEWS_EDIT,
    permissions::FILES_MANAGE,
];

const AI_HOUSE_ADMIN_PERMISSIONS: &[&str] = &[
    permissions::AI_HOUSE_MANAGE,
    permissions::PROJECTS_MANAGE,
    permissions::EVENTS_MANAGE,
];

const INCUBATOR_ADMIN_PERMISSIONS: &[&str] = &[
    permissions::INCUBATOR_MANAGE,
    permissions::STARTUPS_MANAGE,
    permissions::PROGRAMS_MANAGE,
];

const EDITOR_PERMISSIONS: &[&str] = &[
    permissions::NEWS_CREATE,
    permissions::NEWS_EDIT,
    permissions::FILES_UPLOAD,
];

const VIEWER_PERMISSIONS: &[&str] = &[permissions::READ_ONLY];

impl Role {
    /// Get the static permission tokens of this role.
    pub fn default_permissions(&self) -> &'static [&'static str] {
        match self {
            Self::SuperAdmin => SUPER_ADMIN_PERMISSIONS,
            Self::CollegeAdmin => COLLEGE_ADMIN_PERMISSIONS,
            Self::FacultyAdmin => FACULTY_ADMIN_PERMISSIONS,
            Self::DepartmentAdmin => DEPARTMENT_ADMIN_PERMISSIONS,
            Self::AiHouseAdmin => AI_HOUSE_ADMIN_PERMISSIONS,
            Self::IncubatorAdmin => INCUBATOR_ADMIN_PERMISSIONS,
            Self::Editor => EDITOR_PERMISSIONS,
            Self::Viewer => VIEWER_PERMISSIONS,
        }
    }

    /// Check if the role's defaults grant a token.
    ///
    /// True on an exact match or when the defaults hold the wildcard.
    pub fn grants(&self, permission: &str) -> bool {
        self.default_permissions()
            .iter()
            .any(|held| permissions::satisfies(held, permission))
    }

    /// Check if this role may enter the admin area.
    ///
    /// # Returns
    ///
    /// `true` for every role except Editor and Viewer
    pub fn is_admin(&self) -> bool {
        !matches!(self, Self::Editor | Self::Viewer)
    }

    /// Get the organizational unit type a scoped role is anchored to.
    ///
    /// # Returns
    ///
    /// `Some` for college, faculty and department admins, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_rbac::{ResourceType, Role};
    ///
    /// assert_eq!(Role::FacultyAdmin.scope(), Some(ResourceType::Faculty));
    /// assert_eq!(Role::Editor.scope(), None);
    /// ```
    pub fn scope(&self) -> Option<ResourceType> {
        match self {
            Self::CollegeAdmin => Some(ResourceType::College),
            Self::FacultyAdmin => Some(ResourceType::Faculty),
            Self::DepartmentAdmin => Some(ResourceType::Department),
            _ => None,
        }
    }

    /// Check if this role is anchored to an organizational unit.
    pub fn is_scoped(&self) -> bool {
        self.scope().is_some()
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_rbac::Role;
    ///
    /// assert_eq!(Role::parse("faculty_admin"), Some(Role::FacultyAdmin));
    /// assert_eq!(Role::parse("EDITOR"), Some(Role::Editor));
    /// assert_eq!(Role::parse("owner"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "super_admin" => Some(Self::SuperAdmin),
            "college_admin" => Some(Self::CollegeAdmin),
            "faculty_admin" => Some(Self::FacultyAdmin),
            "department_admin" => Some(Self::DepartmentAdmin),
            "ai_house_admin" => Some(Self::AiHouseAdmin),
            "incubator_admin" => Some(Self::IncubatorAdmin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::CollegeAdmin => "college_admin",
            Self::FacultyAdmin => "faculty_admin",
            Self::DepartmentAdmin => "department_admin",
            Self::AiHouseAdmin => "ai_house_admin",
            Self::IncubatorAdmin => "incubator_admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_rbac::Role;
    ///
    /// assert_eq!(Role::AiHouseAdmin.display_name(), "AI House Admin");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::CollegeAdmin => "College Admin",
            Self::FacultyAdmin => "Faculty Admin",
            Self::DepartmentAdmin => "Department Admin",
            Self::AiHouseAdmin => "AI House Admin",
            Self::IncubatorAdmin => "Incubator Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }

    /// Get all roles.
    pub fn all() -> Vec<Self> {
        vec![
            Self::SuperAdmin,
            Self::CollegeAdmin,
            Self::FacultyAdmin,
            Self::DepartmentAdmin,
            Self::AiHouseAdmin,
            Self::IncubatorAdmin,
            Self::Editor,
            Self::Viewer,
        ]
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Viewer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::*;

    #[test]
    fn test_super_admin_holds_wildcard() {
        assert_eq!(Role::SuperAdmin.default_permissions(), &[ALL]);
        assert!(Role::SuperAdmin.grants(COLLEGE_MANAGE));
        assert!(Role::SuperAdmin.grants("made_up_token"));
    }

    #[test]
    fn test_role_table() {
        assert!(Role::CollegeAdmin.grants(USER_MANAGE));
        assert!(Role::CollegeAdmin.grants(FACULTY_MANAGE));
        assert!(!Role::CollegeAdmin.grants(FACULTY_EDIT));

        assert!(Role::FacultyAdmin.grants(FACULTY_EDIT));
        assert!(Role::FacultyAdmin.grants(DEPARTMENT_MANAGE));
        assert!(!Role::FacultyAdmin.grants(DEPARTMENT_EDIT));
        assert!(!Role::FacultyAdmin.grants(USER_MANAGE));

        assert!(Role::DepartmentAdmin.grants(DEPARTMENT_EDIT));
        assert!(Role::DepartmentAdmin.grants(NEWS_CREATE));
        assert!(!Role::DepartmentAdmin.grants(NEWS_MANAGE));

        assert!(Role::AiHouseAdmin.grants(EVENTS_MANAGE));
        assert!(!Role::AiHouseAdmin.grants(STARTUPS_MANAGE));
        assert!(Role::IncubatorAdmin.grants(STARTUPS_MANAGE));

        assert!(Role::Editor.grants(FILES_UPLOAD));
        assert!(!Role::Editor.grants(FILES_MANAGE));
        assert!(Role::Viewer.grants(READ_ONLY));
        assert!(!Role::Viewer.grants(NEWS_CREATE));
    }

    #[test]
    fn test_only_super_admin_has_wildcard() {
        for role in Role::all() {
            let unrestricted = role.default_permissions().contains(&ALL);
            assert_eq!(unrestricted, role == Role::SuperAdmin, "{role}");
        }
    }

    #[test]
    fn test_admin_roles() {
        let admins: Vec<Role> = Role::all().into_iter().filter(Role::is_admin).collect();
        assert_eq!(admins.len(), 6);
        assert!(!Role::Editor.is_admin());
        assert!(!Role::Viewer.is_admin());
    }

    #[test]
    fn test_scoped_roles() {
        assert_eq!(Role::CollegeAdmin.scope(), Some(ResourceType::College));
        assert_eq!(Role::DepartmentAdmin.scope(), Some(ResourceType::Department));
        assert!(!Role::SuperAdmin.is_scoped());
        assert!(!Role::AiHouseAdmin.is_scoped());
    }

    #[test]
    fn test_role_parse() {
        for role in Role::all() {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Super_Admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }
}
