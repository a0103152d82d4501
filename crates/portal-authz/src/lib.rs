//! # Portal Authorization
//!
//! The authorization resolver consulted by every portal route handler.
//!
//! ## Overview
//!
//! - [`Resolver`]: allow/deny decisions, accessible-unit enumeration and
//!   the can-manage-user check
//! - [`Guard`]: handler-facing checks returning [`portal_auth::AuthError`]
//! - [`GrantAdmin`]: issuing and revoking explicit grants
//! - [`AuthorizationStore`] / [`GrantStore`]: the data-source contracts
//! - [`MemoryStore`]: an in-memory store for tests and single-process hosts
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use portal_auth::AuthContext;
//! use portal_authz::{MemoryStore, Resolver};
//! use portal_rbac::{ResourceRef, Role};
//!
//! # async fn example() -> Result<(), portal_authz::ResolverError> {
//! let resolver = Resolver::new(Arc::new(MemoryStore::new()));
//! let ctx = AuthContext::new(5, Role::DepartmentAdmin).with_department(7);
//!
//! let allowed = resolver
//!     .authorize(Some(&ctx), "department_edit", Some(&ResourceRef::department(7)))
//!     .await?;
//! assert!(allowed);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod grants;
pub mod guard;
#[cfg(feature = "memory")]
pub mod memory;
pub mod resolver;
pub mod store;

pub use config::{ConfigError, ResolverConfig};
pub use error::{ResolverError, ResolverResult, StoreError, StoreResult};
pub use grants::GrantAdmin;
pub use guard::{Guard, UserAction};
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use resolver::{Decision, Resolver};
pub use store::{AuthorizationStore, GrantStore, ScopeFilter};
