//! # Portal Organization Model
//!
//! This crate provides the organizational data model of the university
//! portal, as read by the authorization resolver.
//!
//! ## Overview
//!
//! The portal-org crate handles:
//! - **Units**: Colleges, faculties and departments
//! - **Users**: Stored user rows with role, active flag and attachments
//! - **Grants**: Explicit per-resource permission grants
//!
//! ## Architecture
//!
//! ```text
//! College
//!   └─ Faculty (college_id)
//!        └─ Department (faculty_id)
//!
//! UserRecord
//!   ├─ role
//!   ├─ college_id? faculty_id? department_id?
//!   └─ ExplicitGrant* (resource, permission, granted_by)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use portal_org::{College, Department, ExplicitGrant, Faculty, UserRecord};
//! use portal_rbac::{ResourceRef, Role};
//!
//! let college = College::new(1, "College of Engineering");
//! let faculty = Faculty::new(3, college.id, "Faculty of Computing");
//! let dept = Department::new(9, faculty.id, "Software Engineering");
//!
//! let admin = UserRecord::new(10, "fa", "fa@uni.edu", Role::FacultyAdmin)
//!     .with_college(college.id)
//!     .with_faculty(faculty.id);
//!
//! let grant = ExplicitGrant::new(admin.id, ResourceRef::department(dept.id), "files_manage");
//! ```

pub mod grants;
pub mod units;
pub mod user;

// Re-export main types for convenience
pub use grants::ExplicitGrant;
pub use units::{College, Department, DepartmentLineage, Faculty};
pub use user::{UserId, UserRecord};
