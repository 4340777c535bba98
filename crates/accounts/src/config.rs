//! Accounts configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults match the hosted deployment.
//!
//! - `ACCOUNTS_COLLECTION` - Document-store collection for profile documents
//!   (default: users)
//! - `ACCOUNTS_DEFAULT_AVATAR_URL` - Photo URL set on newly registered
//!   accounts (default: /static/mock-images/avatars/avatar_1.jpg)
//! - `ACCOUNTS_SUBMIT_DELAY_MS` - Artificial delay before registration and
//!   login provider calls, smoothing the loading state (default: 500)
//! - `ACCOUNTS_PROFILE_SUBMIT_DELAY_MS` - Same smoothing delay for profile
//!   edits (default: 250)

use std::time::Duration;

use thiserror::Error;

const DEFAULT_COLLECTION: &str = "users";
const DEFAULT_AVATAR_URL: &str = "/static/mock-images/avatars/avatar_1.jpg";
const DEFAULT_SUBMIT_DELAY_MS: u64 = 500;
const DEFAULT_PROFILE_SUBMIT_DELAY_MS: u64 = 250;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Accounts flow configuration.
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Document-store collection holding profile documents.
    pub collection: String,
    /// Photo URL assigned to newly registered accounts.
    pub default_avatar_url: String,
    /// Smoothing delay before registration/login submissions.
    pub submit_delay: Duration,
    /// Smoothing delay before profile-edit submissions.
    pub profile_submit_delay: Duration,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_owned(),
            default_avatar_url: DEFAULT_AVATAR_URL.to_owned(),
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            profile_submit_delay: Duration::from_millis(DEFAULT_PROFILE_SUBMIT_DELAY_MS),
        }
    }
}

impl AccountsConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a delay variable is present but not a valid
    /// millisecond count.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            collection: get_env_or_default("ACCOUNTS_COLLECTION", DEFAULT_COLLECTION),
            default_avatar_url: get_env_or_default(
                "ACCOUNTS_DEFAULT_AVATAR_URL",
                DEFAULT_AVATAR_URL,
            ),
            submit_delay: get_delay_ms("ACCOUNTS_SUBMIT_DELAY_MS", DEFAULT_SUBMIT_DELAY_MS)?,
            profile_submit_delay: get_delay_ms(
                "ACCOUNTS_PROFILE_SUBMIT_DELAY_MS",
                DEFAULT_PROFILE_SUBMIT_DELAY_MS,
            )?,
        })
    }
}

/// Get an environment variable or return the default.
fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Get a millisecond duration from an environment variable.
fn get_delay_ms(name: &str, default: u64) -> Result<Duration, ConfigError> {
    let millis = match std::env::var(name) {
        Ok(value) => parse_millis(name, &value)?,
        Err(_) => default,
    };
    Ok(Duration::from_millis(millis))
}

/// Parse a millisecond count, naming the offending variable on failure.
fn parse_millis(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string()))
}
