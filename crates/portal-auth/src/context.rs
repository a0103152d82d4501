//! Per-request authorization context
//!
//! An [`AuthContext`] is built once per request, from validated token claims
//! or from a freshly read user row, and passed explicitly to the resolver
//! and guards. Nothing reads it from ambient state.

use portal_org::{UserId, UserRecord};
use portal_rbac::{ResourceId, ResourceType, Role};
use serde::{Deserialize, Serialize};

use crate::claims::PortalClaims;
use crate::error::{AuthError, AuthResult};

/// The authenticated subject of a request.
///
/// # Examples
///
/// ```
/// use portal_auth::AuthContext;
/// use portal_rbac::{ResourceType, Role};
///
/// let ctx = AuthContext::new(5, Role::DepartmentAdmin).with_department(7);
/// assert_eq!(ctx.attachment(ResourceType::Department), Some(7));
/// assert!(ctx.is_active);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthContext {
    /// User ID
    pub user_id: UserId,

    /// Typed role
    pub role: Role,

    /// Whether the account is active
    pub is_active: bool,

    /// Attached college
    pub college_id: Option<ResourceId>,

    /// Attached faculty
    pub faculty_id: Option<ResourceId>,

    /// Attached department
    pub department_id: Option<ResourceId>,
}

impl AuthContext {
    /// Creates an active context without attachments.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            is_active: true,
            college_id: None,
            faculty_id: None,
            department_id: None,
        }
    }

    /// Build a context from validated token claims.
    ///
    /// Tokens are only issued to active accounts, so the context is active;
    /// hosts that must observe deactivation before token expiry re-read the
    /// user row instead (see [`AuthContext::from_record`]).
    ///
    /// # Errors
    ///
    /// - `MissingClaim` if the subject is empty
    /// - `InvalidToken` if the subject is not a user ID or the role is unknown
    pub fn from_claims(claims: &PortalClaims) -> AuthResult<Self> {
        if claims.sub.is_empty() {
            return Err(AuthError::MissingClaim("sub".to_string()));
        }
        let user_id = claims
            .user_id()
            .ok_or_else(|| AuthError::InvalidToken(format!("Invalid subject: {}", claims.sub)))?;
        let role = claims
            .role()
            .ok_or_else(|| AuthError::InvalidToken(format!("Unknown role: {}", claims.role)))?;

        Ok(Self {
            user_id,
            role,
            is_active: true,
            college_id: claims.college_id,
            faculty_id: claims.faculty_id,
            department_id: claims.department_id,
        })
    }

    /// Build a context from a stored user row.
    ///
    /// # Returns
    ///
    /// `None` when the stored role string is not a known role
    pub fn from_record(record: &UserRecord) -> Option<Self> {
        Some(Self {
            user_id: record.id,
            role: record.role()?,
            is_active: record.is_active,
            college_id: record.college_id,
            faculty_id: record.faculty_id,
            department_id: record.department_id,
        })
    }

    /// Attach to a college.
    pub fn with_college(mut self, college_id: ResourceId) -> Self {
        self.college_id = Some(college_id);
        self
    }

    /// Attach to a faculty.
    pub fn with_faculty(mut self, faculty_id: ResourceId) -> Self {
        self.faculty_id = Some(faculty_id);
        self
    }

    /// Attach to a department.
    pub fn with_department(mut self, department_id: ResourceId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Mark the context inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Get the attachment for an organizational unit type.
    pub fn attachment(&self, unit: ResourceType) -> Option<ResourceId> {
        match unit {
            ResourceType::College => self.college_id,
            ResourceType::Faculty => self.faculty_id,
            ResourceType::Department => self.department_id,
            _ => None,
        }
    }

    /// Get the attachment a scoped role is anchored to.
    ///
    /// # Returns
    ///
    /// `None` for unscoped roles or when the anchor attachment is missing
    pub fn anchor(&self) -> Option<(ResourceType, ResourceId)> {
        let unit = self.role.scope()?;
        self.attachment(unit).map(|id| (unit, id))
    }

    /// Check if this is an active super admin.
    pub fn is_super_admin(&self) -> bool {
        self.is_active && self.role == Role::SuperAdmin
    }
}
