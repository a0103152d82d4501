//! # Resource Types
//!
//! Defines the resource types permissions can be scoped to.
//!
//! The organizational units (college, faculty, department) form a strict
//! hierarchy; the content areas (news, files, ...) are flat and only take
//! part in explicit grants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a resource instance (database row id).
pub type ResourceId = i64;

/// Resource types that permissions can be scoped to.
///
/// - **Organizational**: College, Faculty, Department
/// - **Content**: News, Files, Downloads, AiHouse, Incubator, User
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    // Organizational units
    /// A college (top of the organizational tree).
    College,
    /// A faculty, owned by exactly one college.
    Faculty,
    /// A department, owned by exactly one faculty.
    Department,

    // Content areas
    /// News items.
    News,
    /// Uploaded files.
    Files,
    /// Public downloads.
    Downloads,
    /// The AI House section.
    AiHouse,
    /// The incubator section.
    Incubator,
    /// Portal user accounts.
    User,
}

impl ResourceType {
    /// Get the string representation of the resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::College => "college",
            ResourceType::Faculty => "faculty",
            ResourceType::Department => "department",
            ResourceType::News => "news",
            ResourceType::Files => "files",
            ResourceType::Downloads => "downloads",
            ResourceType::AiHouse => "ai_house",
            ResourceType::Incubator => "incubator",
            ResourceType::User => "user",
        }
    }

    /// Check if this type is a unit of the organizational tree.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_rbac::resources::ResourceType;
    ///
    /// assert!(ResourceType::Faculty.is_organizational());
    /// assert!(!ResourceType::News.is_organizational());
    /// ```
    pub fn is_organizational(&self) -> bool {
        matches!(
            self,
            ResourceType::College | ResourceType::Faculty | ResourceType::Department
        )
    }

    /// Get the type of the unit that owns units of this type.
    ///
    /// # Returns
    ///
    /// `Some` for faculty and department, `None` for everything else
    ///
    /// # Example
    ///
    /// ```
    /// use portal_rbac::resources::ResourceType;
    ///
    /// assert_eq!(ResourceType::Department.parent(), Some(ResourceType::Faculty));
    /// assert_eq!(ResourceType::College.parent(), None);
    /// ```
    pub fn parent(&self) -> Option<ResourceType> {
        match self {
            ResourceType::Faculty => Some(ResourceType::College),
            ResourceType::Department => Some(ResourceType::Faculty),
            _ => None,
        }
    }

    /// Parse resource type from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports plural forms)
    ///
    /// # Returns
    ///
    /// `Some(ResourceType)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use portal_rbac::resources::ResourceType;
    ///
    /// assert_eq!(ResourceType::parse("department"), Some(ResourceType::Department));
    /// assert_eq!(ResourceType::parse("faculties"), Some(ResourceType::Faculty));
    /// assert_eq!(ResourceType::parse("ai-house"), Some(ResourceType::AiHouse));
    /// assert_eq!(ResourceType::parse("campus"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "college" | "colleges" => Some(ResourceType::College),
            "faculty" | "faculties" => Some(ResourceType::Faculty),
            "department" | "departments" => Some(ResourceType::Department),
            "news" => Some(ResourceType::News),
            "file" | "files" => Some(ResourceType::Files),
            "download" | "downloads" => Some(ResourceType::Downloads),
            "ai_house" | "ai-house" | "aihouse" => Some(ResourceType::AiHouse),
            "incubator" => Some(ResourceType::Incubator),
            "user" | "users" => Some(ResourceType::User),
            _ => None,
        }
    }

    /// Get all resource types.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceType::College,
            ResourceType::Faculty,
            ResourceType::Department,
            ResourceType::News,
            ResourceType::Files,
            ResourceType::Downloads,
            ResourceType::AiHouse,
            ResourceType::Incubator,
            ResourceType::User,
        ]
    }

    /// Get the organizational unit types, root first.
    pub fn organizational() -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|r| r.is_organizational())
            .collect()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to one resource instance, e.g. `department:42`.
///
/// # Example
///
/// ```
/// use portal_rbac::resources::{ResourceRef, ResourceType};
///
/// let dept = ResourceRef::department(42);
/// assert_eq!(dept.to_string(), "department:42");
///
/// let parsed = ResourceRef::parse("Departments", 42).unwrap();
/// assert_eq!(parsed, dept);
/// assert!(ResourceRef::parse("campus", 1).is_none());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceRef {
    /// The resource type.
    pub resource_type: ResourceType,
    /// The resource instance id.
    pub resource_id: ResourceId,
}

impl ResourceRef {
    /// Create a reference to a resource instance.
    pub fn new(resource_type: ResourceType, resource_id: ResourceId) -> Self {
        Self {
            resource_type,
            resource_id,
        }
    }

    /// Reference a college.
    pub fn college(id: ResourceId) -> Self {
        Self::new(ResourceType::College, id)
    }

    /// Reference a faculty.
    pub fn faculty(id: ResourceId) -> Self {
        Self::new(ResourceType::Faculty, id)
    }

    /// Reference a department.
    pub fn department(id: ResourceId) -> Self {
        Self::new(ResourceType::Department, id)
    }

    /// Build a reference from an untyped resource type string.
    ///
    /// # Returns
    ///
    /// `None` when the type string is not a known resource type
    pub fn parse(resource_type: &str, resource_id: ResourceId) -> Option<Self> {
        ResourceType::parse(resource_type).map(|t| Self::new(t, resource_id))
    }

    /// Check if the referenced resource is an organizational unit.
    pub fn is_organizational(&self) -> bool {
        self.resource_type.is_organizational()
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type.as_str(), self.resource_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organizational_types() {
        assert_eq!(
            ResourceType::organizational(),
            vec![
                ResourceType::College,
                ResourceType::Faculty,
                ResourceType::Department
            ]
        );
        for t in [
            ResourceType::News,
            ResourceType::Files,
            ResourceType::Downloads,
            ResourceType::AiHouse,
            ResourceType::Incubator,
            ResourceType::User,
        ] {
            assert!(!t.is_organizational());
            assert_eq!(t.parent(), None);
        }
    }

    #[test]
    fn test_hierarchy_parents() {
        assert_eq!(ResourceType::Faculty.parent(), Some(ResourceType::College));
        assert_eq!(ResourceType::Department.parent(), Some(ResourceType::Faculty));
        assert_eq!(ResourceType::College.parent(), None);
    }

    #[test]
    fn test_parse_round_trips_as_str() {
        for t in ResourceType::all() {
            assert_eq!(ResourceType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_parse_plural_and_case() {
        assert_eq!(ResourceType::parse("COLLEGES"), Some(ResourceType::College));
        assert_eq!(ResourceType::parse("Faculties"), Some(ResourceType::Faculty));
        assert_eq!(ResourceType::parse(" departments "), Some(ResourceType::Department));
        assert_eq!(ResourceType::parse(""), None);
        assert_eq!(ResourceType::parse("school"), None);
    }

    #[test]
    fn test_resource_ref_display() {
        assert_eq!(ResourceRef::college(1).to_string(), "college:1");
        assert_eq!(ResourceRef::faculty(3).to_string(), "faculty:3");
        assert_eq!(
            ResourceRef::new(ResourceType::AiHouse, 9).to_string(),
            "ai_house:9"
        );
    }

    #[test]
    fn test_resource_type_serde() {
        let json = serde_json::to_string(&ResourceType::AiHouse).unwrap();
        assert_eq!(json, "\"ai_house\"");
        let parsed: ResourceType = serde_json::from_str("\"department\"").unwrap();
        assert_eq!(parsed, ResourceType::Department);
    }
}
