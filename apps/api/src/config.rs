use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
///
/// `API_KEY` is optional at startup. A missing key surfaces as a
/// MissingCredential failure when a roadmap is requested, not as a crash.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Sessions untouched for this long are evicted from memory.
    pub session_idle_ttl: Duration,
}

const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 2 * 60 * 60;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key: optional_env("API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_idle_ttl: Duration::from_secs(
                optional_env("SESSION_IDLE_TTL_SECS")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("SESSION_IDLE_TTL_SECS must be a number of seconds")?
                    .unwrap_or(DEFAULT_SESSION_IDLE_TTL_SECS),
            ),
        })
    }
}

/// Reads an env var, treating blank values the same as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("ENGIPATH_TEST_BLANK", "   ");
        assert_eq!(optional_env("ENGIPATH_TEST_BLANK"), None);
    }

    #[test]
    fn test_optional_env_trims_value() {
        std::env::set_var("ENGIPATH_TEST_PADDED", "  abc  ");
        assert_eq!(optional_env("ENGIPATH_TEST_PADDED").as_deref(), Some("abc"));
    }

    #[test]
    fn test_optional_env_missing_is_none() {
        assert_eq!(optional_env("ENGIPATH_TEST_DEFINITELY_UNSET"), None);
    }
}
