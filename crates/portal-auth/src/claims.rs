//! JWT claims for portal authentication
//!
//! This module defines the claims carried by access and refresh tokens.
//! Besides the standard fields they carry the user's role and
//! organizational attachments, from which the per-request
//! [`AuthContext`](crate::context::AuthContext) is built.

use chrono::{DateTime, Utc};
use portal_org::{UserId, UserRecord};
use portal_rbac::{ResourceId, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token issuer.
pub const DEFAULT_ISSUER: &str = "university-portal";

/// Standard JWT claims with portal-specific extensions.
///
/// # Example
///
/// ```rust
/// use portal_auth::claims::PortalClaims;
/// use portal_rbac::Role;
///
/// let claims = PortalClaims::new(7, Role::Editor, chrono::Duration::hours(1));
/// assert_eq!(claims.user_id(), Some(7));
/// assert_eq!(claims.role(), Some(Role::Editor));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalClaims {
    // Standard JWT claims (RFC 7519)
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    // Portal-specific claims
    /// Role string at issue time
    pub role: String,

    /// Attached college
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<ResourceId>,

    /// Attached faculty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<ResourceId>,

    /// Attached department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<ResourceId>,

    /// Token type (access, refresh)
    #[serde(default)]
    pub token_type: TokenType,
}

impl PortalClaims {
    /// Create new claims for a user without attachments.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's identifier
    /// * `role` - The user's role
    /// * `duration` - Token validity duration
    pub fn new(user_id: UserId, role: Role, duration: chrono::Duration) -> Self {
        let now = Utc::now();
        let exp = now + duration;

        Self {
            sub: user_id.to_string(),
            iss: DEFAULT_ISSUER.to_string(),
            aud: vec![DEFAULT_ISSUER.to_string()],
            exp: exp.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            role: role.as_str().to_string(),
            college_id: None,
            faculty_id: None,
            department_id: None,
            token_type: TokenType::Access,
        }
    }

    /// Create claims mirroring a stored user row.
    ///
    /// # Returns
    ///
    /// `None` when the stored role string is not a known role
    pub fn for_user(user: &UserRecord, duration: chrono::Duration) -> Option<Self> {
        let role = user.role()?;
        let mut claims = Self::new(user.id, role, duration);
        claims.college_id = user.college_id;
        claims.faculty_id = user.faculty_id;
        claims.department_id = user.department_id;
        Some(claims)
    }

    /// Get the user ID.
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }

    /// Get the parsed role.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Check if the token is expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get expiration as DateTime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Set the issuer and audience.
    pub fn with_issuer(mut self, issuer: impl Into<String>, audience: Vec<String>) -> Self {
        self.iss = issuer.into();
        self.aud = audience;
        self
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }
}

/// Token type enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token (short-lived)
    Access,

    /// Refresh token (long-lived)
    Refresh,
}

impl Default for TokenType {
    fn default() -> Self {
        TokenType::Access
    }
}
