//! Error types for authentication and authorization operations
//!
//! This module defines the errors raised while validating tokens, building
//! the per-request context and guarding handlers.

use thiserror::Error;

/// Authentication error types.
///
/// These errors cover token validation, account state and guard rejections.
/// Every variant maps to an HTTP status code and an API error code.
#[derive(Debug, Error)]
pub enum AuthError {
    /// JWT token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// JWT token is invalid (malformed, bad signature, wrong type, etc.)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token is missing required claims
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// Caller is not authenticated
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller lacks the required permission
    #[error("Forbidden: insufficient permissions")]
    Forbidden,

    /// Endpoint is restricted to admin roles
    #[error("Forbidden: admin privileges required")]
    AdminRequired,

    /// Caller attempted a destructive action on their own account
    #[error("Cannot {0} your own account")]
    SelfManagement(String),

    /// Account is deactivated
    #[error("Account is disabled")]
    AccountDisabled,

    /// The authorization data source could not answer; the request is rejected
    #[error("Authorization unavailable: {0}")]
    AuthorizationUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Check if this error should be logged at error level.
    ///
    /// Rejections (bad tokens, missing permissions) are expected and
    /// should not be logged as errors.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AuthError::Internal(_)
                | AuthError::ConfigError(_)
                | AuthError::AuthorizationUnavailable(_)
        )
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::TokenExpired
            | AuthError::InvalidToken(_)
            | AuthError::MissingClaim(_)
            | AuthError::Unauthorized(_) => 401,

            AuthError::Forbidden | AuthError::AdminRequired | AuthError::AccountDisabled => 403,
            AuthError::SelfManagement(_) => 400,
            AuthError::AuthorizationUnavailable(_) => 503,

            AuthError::ConfigError(_) | AuthError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken(_) => "INVALID_TOKEN",
            AuthError::MissingClaim(_) => "MISSING_CLAIM",
            AuthError::Unauthorized(_) => "UNAUTHORIZED",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::AdminRequired => "ADMIN_REQUIRED",
            AuthError::SelfManagement(_) => "SELF_MANAGEMENT",
            AuthError::AccountDisabled => "ACCOUNT_DISABLED",
            AuthError::AuthorizationUnavailable(_) => "AUTHORIZATION_UNAVAILABLE",
            AuthError::ConfigError(_) => "CONFIG_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::TokenExpired.status_code(), 401);
        assert_eq!(AuthError::Forbidden.status_code(), 403);
        assert_eq!(AuthError::AdminRequired.status_code(), 403);
        assert_eq!(AuthError::SelfManagement("delete".into()).status_code(), 400);
        assert_eq!(
            AuthError::AuthorizationUnavailable("db down".into()).status_code(),
            503
        );
    }

    #[test]
    fn test_server_errors() {
        assert!(AuthError::AuthorizationUnavailable("db down".into()).is_server_error());
        assert!(AuthError::Internal("boom".into()).is_server_error());
        assert!(!AuthError::Forbidden.is_server_error());
        assert!(!AuthError::InvalidToken("bad".into()).is_server_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::SelfManagement("delete".into()).to_string(),
            "Cannot delete your own account"
        );
        assert_eq!(AuthError::Forbidden.error_code(), "FORBIDDEN");
    }
}
