//! JWT token generation and validation
//!
//! This module provides JWT token operations using the jsonwebtoken crate.
//! Tokens are signed with a shared secret (HS256, HS384 or HS512).

use crate::claims::{PortalClaims, TokenType, DEFAULT_ISSUER};
use crate::context::AuthContext;
use crate::error::{AuthError, AuthResult};
use chrono::Duration;
use portal_org::UserRecord;
use serde::{Deserialize, Serialize};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};

/// JWT configuration for token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared secret for HMAC signing
    pub secret: String,

    /// Algorithm to use
    pub algorithm: JwtAlgorithm,

    /// Token issuer
    pub issuer: String,

    /// Token audience
    pub audience: Vec<String>,

    /// Access token duration
    pub access_token_duration: Duration,

    /// Refresh token duration
    pub refresh_token_duration: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_duration", &self.access_token_duration)
            .field("refresh_token_duration", &self.refresh_token_duration)
            .finish()
    }
}

impl JwtConfig {
    /// Create a configuration with defaults and the given secret.
    ///
    /// Access tokens live one hour, refresh tokens thirty days.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: JwtAlgorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: vec![DEFAULT_ISSUER.to_string()],
            access_token_duration: Duration::seconds(3600),
            refresh_token_duration: Duration::seconds(2_592_000),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `JWT_SECRET_KEY`: Signing secret (required)
    /// - `JWT_ALGORITHM`: HS256, HS384 or HS512 (default: HS256)
    /// - `JWT_ISSUER`: Issuer and audience (default: university-portal)
    /// - `JWT_ACCESS_TOKEN_EXPIRES`: Access token lifetime in seconds (default: 3600)
    /// - `JWT_REFRESH_TOKEN_EXPIRES`: Refresh token lifetime in seconds (default: 2592000)
    ///
    /// # Errors
    ///
    /// `ConfigError` if the secret is missing or a value does not parse
    pub fn from_env() -> AuthResult<Self> {
        let secret = std::env::var("JWT_SECRET_KEY")
            .map_err(|_| AuthError::ConfigError("JWT_SECRET_KEY is not set".to_string()))?;
        let mut config = Self::with_secret(secret);

        if let Ok(alg) = std::env::var("JWT_ALGORITHM") {
            config.algorithm = JwtAlgorithm::parse(&alg).ok_or_else(|| {
                AuthError::ConfigError(format!("Unsupported JWT_ALGORITHM: {}", alg))
            })?;
        }
        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            config.audience = vec![issuer.clone()];
            config.issuer = issuer;
        }
        if let Some(secs) = env_seconds("JWT_ACCESS_TOKEN_EXPIRES")? {
            config.access_token_duration = Duration::seconds(secs);
        }
        if let Some(secs) = env_seconds("JWT_REFRESH_TOKEN_EXPIRES")? {
            config.refresh_token_duration = Duration::seconds(secs);
        }

        Ok(config)
    }
}

fn env_seconds(key: &str) -> AuthResult<Option<i64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Some)
            .ok_or_else(|| AuthError::ConfigError(format!("Invalid {}: {}", key, raw))),
        Err(_) => Ok(None),
    }
}

/// Supported JWT algorithms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum JwtAlgorithm {
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
}

impl JwtAlgorithm {
    /// Parse an algorithm name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HS256" => Some(JwtAlgorithm::HS256),
            "HS384" => Some(JwtAlgorithm::HS384),
            "HS512" => Some(JwtAlgorithm::HS512),
            _ => None,
        }
    }
}

impl From<JwtAlgorithm> for Algorithm {
    fn from(alg: JwtAlgorithm) -> Self {
        match alg {
            JwtAlgorithm::HS256 => Algorithm::HS256,
            JwtAlgorithm::HS384 => Algorithm::HS384,
            JwtAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

/// JWT service for token operations.
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the secret is empty
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::ConfigError("Secret required for HMAC".to_string()));
        }
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Create with a simple secret (HS256, default lifetimes).
    pub fn with_secret(secret: impl Into<String>) -> AuthResult<Self> {
        Self::new(JwtConfig::with_secret(secret))
    }

    /// Generate an access token for a stored user.
    ///
    /// # Errors
    ///
    /// - `AccountDisabled` if the account is inactive
    /// - `Unauthorized` if the stored role is unknown
    pub fn generate_access_token(&self, user: &UserRecord) -> AuthResult<String> {
        let claims = self.claims_for(user, self.config.access_token_duration)?;
        self.encode_claims(&claims)
    }

    /// Generate a refresh token for a stored user.
    pub fn generate_refresh_token(&self, user: &UserRecord) -> AuthResult<String> {
        let claims = self
            .claims_for(user, self.config.refresh_token_duration)?
            .with_token_type(TokenType::Refresh);
        self.encode_claims(&claims)
    }

    /// Generate an access/refresh token pair for a stored user.
    pub fn issue_token_pair(&self, user: &UserRecord) -> AuthResult<TokenPair> {
        Ok(TokenPair::new(
            self.generate_access_token(user)?,
            self.generate_refresh_token(user)?,
            self.config.access_token_duration.num_seconds(),
        ))
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The access token mirrors the current user row, so role and
    /// attachment changes made since login take effect.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if the token is not a refresh token or belongs to another user
    /// - anything [`JwtService::validate_token`] or token generation returns
    pub fn refresh_access_token(&self, refresh_token: &str, user: &UserRecord) -> AuthResult<String> {
        let claims = self.validate_token(refresh_token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AuthError::InvalidToken("Not a refresh token".to_string()));
        }
        if claims.user_id() != Some(user.id) {
            return Err(AuthError::InvalidToken("Token subject mismatch".to_string()));
        }
        self.generate_access_token(user)
    }

    fn claims_for(&self, user: &UserRecord, duration: Duration) -> AuthResult<PortalClaims> {
        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }
        let claims = PortalClaims::for_user(user, duration)
            .ok_or_else(|| AuthError::Unauthorized(format!("Unknown role: {}", user.role)))?;
        Ok(claims.with_issuer(self.config.issuer.clone(), self.config.audience.clone()))
    }

    /// Generate a token from existing claims.
    pub fn encode_claims(&self, claims: &PortalClaims) -> AuthResult<String> {
        let header = Header::new(self.config.algorithm.into());
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Validate and decode a token of any type.
    pub fn validate_token(&self, token: &str) -> AuthResult<PortalClaims> {
        let mut validation = Validation::new(self.config.algorithm.into());
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&self.config.audience);

        let token_data: TokenData<PortalClaims> = decode(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AuthError::InvalidToken("Malformed token".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidToken("Invalid signature".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AuthError::InvalidToken("Invalid issuer".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        AuthError::InvalidToken("Invalid audience".to_string())
                    }
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and build the request context from it.
    ///
    /// # Errors
    ///
    /// `InvalidToken` for refresh tokens, plus any validation error
    pub fn authenticate(&self, token: &str) -> AuthResult<AuthContext> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AuthError::InvalidToken("Not an access token".to_string()));
        }
        AuthContext::from_claims(&claims)
    }

    /// Authenticate a raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if the header is not a bearer token
    pub fn authenticate_header(&self, header_value: &str) -> AuthResult<AuthContext> {
        let token = header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::Unauthorized("Bearer token required".to_string()))?;
        self.authenticate(token)
    }

    /// Get the configuration.
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }
}

/// Token pair containing access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived)
    pub access_token: String,

    /// Refresh token (long-lived)
    pub refresh_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Access token expiration in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Create a new token pair.
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
