//! # Portal Authentication
//!
//! This crate provides token authentication for the university portal and
//! the per-request [`AuthContext`] the authorization layer consumes.
//!
//! ## Overview
//!
//! The portal-auth crate handles:
//! - **JWT**: Access/refresh token issuance and validation
//! - **Claims**: Role and organizational attachments carried in tokens
//! - **Context**: The typed subject of a request, built once per request
//! - **Errors**: Rejections with HTTP status and API error codes
//!
//! ## Features
//!
//! - `jwt` (default): JWT token support using jsonwebtoken
//!
//! ## Usage
//!
//! ```rust,no_run
//! use portal_auth::{JwtConfig, JwtService};
//! use portal_org::UserRecord;
//! use portal_rbac::Role;
//!
//! let service = JwtService::new(JwtConfig::from_env().unwrap()).unwrap();
//!
//! let user = UserRecord::new(7, "head", "head@uni.edu", Role::DepartmentAdmin)
//!     .with_department(7);
//! let pair = service.issue_token_pair(&user).unwrap();
//!
//! // Per request:
//! let ctx = service
//!     .authenticate_header(&format!("Bearer {}", pair.access_token))
//!     .unwrap();
//! assert_eq!(ctx.department_id, Some(7));
//! ```
//!
//! ## Integration
//!
//! - `portal-org`: tokens are issued for stored user rows
//! - `portal-authz`: guards take the `AuthContext` built here

pub mod claims;
pub mod context;
pub mod error;
#[cfg(feature = "jwt")]
pub mod jwt;

// Re-export main types
pub use claims::{PortalClaims, TokenType};
pub use context::AuthContext;
pub use error::{AuthError, AuthResult};

#[cfg(feature = "jwt")]
pub use jwt::{JwtAlgorithm, JwtConfig, JwtService, TokenPair};
