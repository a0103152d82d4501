//! Organizational unit models
//!
//! This module provides the three levels of the university tree.
//! Every faculty belongs to exactly one college and every department to
//! exactly one faculty.

use chrono::{DateTime, Utc};
use portal_rbac::ResourceId;
use serde::{Deserialize, Serialize};

/// A college, the root of the organizational tree.
///
/// # Architecture
///
/// ```text
/// College
///   └─ Faculty
///        └─ Department
/// ```
///
/// # Examples
///
/// ```
/// use portal_org::College;
///
/// let college = College::new(1, "College of Engineering");
/// assert!(college.is_active);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct College {
    /// Unique identifier
    pub id: ResourceId,

    /// Human-readable name
    pub name: String,

    /// Short code (e.g. "ENG")
    pub code: Option<String>,

    /// Whether the college is active
    pub is_active: bool,

    /// When the college was created
    pub created_at: DateTime<Utc>,
}

impl College {
    /// Creates a new active college.
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Set the short code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Mark the college inactive.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A faculty within a college.
///
/// # Examples
///
/// ```
/// use portal_org::Faculty;
///
/// let faculty = Faculty::new(3, 1, "Faculty of Computing");
/// assert_eq!(faculty.college_id, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Faculty {
    /// Unique identifier
    pub id: ResourceId,

    /// Owning college
    pub college_id: ResourceId,

    /// Human-readable name
    pub name: String,

    /// Short code
    pub code: Option<String>,

    /// Whether the faculty is active
    pub is_active: bool,

    /// When the faculty was created
    pub created_at: DateTime<Utc>,
}

impl Faculty {
    /// Creates a new active faculty under a college.
    pub fn new(id: ResourceId, college_id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            college_id,
            name: name.into(),
            code: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Set the short code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Mark the faculty inactive.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A department within a faculty.
///
/// # Examples
///
/// ```
/// use portal_org::Department;
///
/// let dept = Department::new(9, 3, "Software Engineering");
/// assert_eq!(dept.faculty_id, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    /// Unique identifier
    pub id: ResourceId,

    /// Owning faculty
    pub faculty_id: ResourceId,

    /// Human-readable name
    pub name: String,

    /// Short code
    pub code: Option<String>,

    /// Whether the department is active
    pub is_active: bool,

    /// When the department was created
    pub created_at: DateTime<Utc>,
}

impl Department {
    /// Creates a new active department under a faculty.
    pub fn new(id: ResourceId, faculty_id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            faculty_id,
            name: name.into(),
            code: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Set the short code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Mark the department inactive.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// The owning faculty and college of a department.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentLineage {
    /// Owning faculty
    pub faculty_id: ResourceId,

    /// College that owns the faculty
    pub college_id: ResourceId,
}
