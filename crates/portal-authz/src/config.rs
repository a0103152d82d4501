//! Resolver configuration
//!
//! Loaded from environment variables with defaults suitable for
//! production use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable controlling subject refresh.
pub const ENV_REFRESH_SUBJECT: &str = "AUTHZ_REFRESH_SUBJECT";

/// Environment variable controlling decision logging.
pub const ENV_LOG_DECISIONS: &str = "AUTHZ_LOG_DECISIONS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Resolver and guard settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Re-read the user row on every guarded request instead of trusting
    /// the token context. Deactivation and role changes then take effect
    /// before the token expires.
    pub refresh_subject: bool,

    /// Emit a debug event for every decision.
    pub log_decisions: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            refresh_subject: true,
            log_decisions: false,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` when a variable is set to something other than
    /// a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Ok(Self {
            refresh_subject: read_flag(&lookup, ENV_REFRESH_SUBJECT)?
                .unwrap_or(default.refresh_subject),
            log_decisions: read_flag(&lookup, ENV_LOG_DECISIONS)?.unwrap_or(default.log_decisions),
        })
    }

    /// Trust token contexts instead of re-reading user rows.
    pub fn trusting_tokens(mut self) -> Self {
        self.refresh_subject = false;
        self
    }

    /// Log every decision at debug level.
    pub fn with_decision_logging(mut self) -> Self {
        self.log_decisions = true;
        self
    }
}

fn read_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}
