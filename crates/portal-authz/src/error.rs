//! Error types for the authorization layer
//!
//! A denial is never an error: the resolver returns `Ok(false)`. Errors
//! here mean the data source could not answer, and callers must treat
//! them as a denial.

use portal_auth::AuthError;
use thiserror::Error;

/// Data-source error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data source is unreachable
    #[error("Connection error: {0}")]
    Connection(String),

    /// A lookup failed
    #[error("Query failed: {0}")]
    Query(String),
}

/// Result type for data-source operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Resolver error types.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// A lookup needed for the decision failed
    #[error("Authorization data unavailable: {0}")]
    Unavailable(#[from] StoreError),
}

/// Result type for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

impl From<ResolverError> for AuthError {
    fn from(err: ResolverError) -> Self {
        AuthError::AuthorizationUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_error_fails_closed() {
        let err = ResolverError::from(StoreError::Connection("refused".to_string()));
        let auth: AuthError = err.into();

        assert!(matches!(auth, AuthError::AuthorizationUnavailable(_)));
        assert_eq!(auth.status_code(), 503);
        assert!(auth.to_string().contains("refused"));
    }
}
