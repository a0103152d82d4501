//! User account rows
//!
//! This module provides the stored user record the authorization resolver
//! reads: role, active flag and organizational attachments.

use chrono::{DateTime, Utc};
use portal_rbac::{ResourceId, ResourceType, Role};
use serde::{Deserialize, Serialize};

/// Identifier of a portal user.
pub type UserId = i64;

/// A stored portal user.
///
/// The role is kept as the raw stored string; [`UserRecord::role`] parses it.
/// A row carrying an unknown role string parses to `None` and is denied
/// everything by the resolver.
///
/// The three attachments are independent and optional. A college admin is
/// normally attached to a college, a faculty admin to a faculty (and its
/// college), a department admin to a department.
///
/// # Examples
///
/// ```
/// use portal_org::UserRecord;
/// use portal_rbac::Role;
///
/// let user = UserRecord::new(5, "dept.head", "head@uni.edu", Role::DepartmentAdmin)
///     .with_department(7);
/// assert_eq!(user.role(), Some(Role::DepartmentAdmin));
/// assert_eq!(user.department_id, Some(7));
/// assert!(user.is_active);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    /// Unique user ID
    pub id: UserId,

    /// Login name
    pub username: String,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Stored role string
    pub role: String,

    /// Attached college
    pub college_id: Option<ResourceId>,

    /// Attached faculty
    pub faculty_id: Option<ResourceId>,

    /// Attached department
    pub department_id: Option<ResourceId>,

    /// Whether the account is active
    pub is_active: bool,

    /// Last successful login
    pub last_login: Option<DateTime<Utc>>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a new active user without attachments.
    ///
    /// The display name defaults to the username.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        let username = username.into();
        Self {
            id,
            name: username.clone(),
            username,
            email: email.into(),
            role: role.as_str().to_string(),
            college_id: None,
            faculty_id: None,
            department_id: None,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    /// Parse the stored role.
    ///
    /// # Returns
    ///
    /// `None` when the stored string is not a known role
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Store a raw role string as-is.
    pub fn with_raw_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Attach the user to a college.
    pub fn with_college(mut self, college_id: ResourceId) -> Self {
        self.college_id = Some(college_id);
        self
    }

    /// Attach the user to a faculty.
    pub fn with_faculty(mut self, faculty_id: ResourceId) -> Self {
        self.faculty_id = Some(faculty_id);
        self
    }

    /// Attach the user to a department.
    pub fn with_department(mut self, department_id: ResourceId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Mark the account inactive.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Get the attachment for an organizational unit type.
    ///
    /// # Returns
    ///
    /// `None` for non-organizational types or when unattached
    pub fn attachment(&self, unit: ResourceType) -> Option<ResourceId> {
        match unit {
            ResourceType::College => self.college_id,
            ResourceType::Faculty => self.faculty_id,
            ResourceType::Department => self.department_id,
            _ => None,
        }
    }

    /// Record a successful login.
    pub fn record_login(&mut self) {
        self.last_login = Some(Utc::now());
    }
}
