//! # Portal RBAC (Role-Based Access Control)
//!
//! This crate provides the role and permission vocabulary of the
//! university portal.
//!
//! ## Overview
//!
//! The portal-rbac crate handles:
//! - **Roles**: The fixed role enumeration and its static permission table
//! - **Permissions**: Opaque permission tokens and wildcard matching
//! - **Resources**: Resource types and `(type, id)` resource references
//!
//! ## Architecture
//!
//! ```text
//! Role ──(static table)──→ &[token] ──(satisfies)──→ decision
//!
//! Organizational tree:
//!   college ⊃ faculty ⊃ department
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use portal_rbac::{ResourceRef, ResourceType, Role};
//!
//! let role = Role::parse("department_admin").unwrap();
//! assert!(role.grants("department_edit"));
//! assert_eq!(role.scope(), Some(ResourceType::Department));
//!
//! let dept = ResourceRef::department(7);
//! assert!(dept.is_organizational());
//! ```
//!
//! ## Wildcard
//!
//! The token `all` satisfies every requirement; only `super_admin`
//! holds it by default.
//!
//! ## Integration with portal-authz
//!
//! Role defaults are coarse-grained. Whether a scoped admin may act on a
//! *specific* college, faculty or department is decided by the resolver in
//! `portal-authz`, which combines these defaults with the organizational
//! tree and explicit grants.

pub mod permissions;
pub mod resources;
pub mod roles;

// Re-export main types for convenience
pub use permissions::Permission;
pub use resources::{ResourceId, ResourceRef, ResourceType};
pub use roles::Role;
