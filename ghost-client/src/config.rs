//! Environment-backed configuration for the Ghost Admin API.
//!
//! Two variables are required at startup: `GHOST_API_URL` (the site's base
//! URL) and `GHOST_ADMIN_API_KEY` (an Admin API key in `<id>:<secret>`
//! format). A missing variable is a startup failure, never a per-call error.

use std::env;

use crate::error::{ClientError, ClientResult};

/// Default Accept-Version sent to the Admin API.
pub const DEFAULT_API_VERSION: &str = "v5.0";

const API_URL_VAR: &str = "GHOST_API_URL";
const ADMIN_KEY_VAR: &str = "GHOST_ADMIN_API_KEY";
const API_VERSION_VAR: &str = "GHOST_API_VERSION";

/// Connection settings for a Ghost site's Admin API.
#[derive(Debug, Clone)]
pub struct GhostConfig {
    /// Site base URL, e.g. `https://demo.ghost.io`.
    pub api_url: String,
    /// Admin API key, `<id>:<secret>` with a hex-encoded secret.
    pub admin_api_key: String,
    /// Accept-Version string, e.g. `v5.0`.
    pub version: String,
}

impl GhostConfig {
    pub fn new(
        api_url: impl Into<String>,
        admin_api_key: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            admin_api_key: admin_api_key.into(),
            version: version.into(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> ClientResult<Self> {
        let api_url = env::var(API_URL_VAR).map_err(|_| {
            ClientError::config_error(format!(
                "{API_URL_VAR} and {ADMIN_KEY_VAR} environment variables are required"
            ))
        })?;
        let admin_api_key = env::var(ADMIN_KEY_VAR).map_err(|_| {
            ClientError::config_error(format!(
                "{API_URL_VAR} and {ADMIN_KEY_VAR} environment variables are required"
            ))
        })?;
        let version = env::var(API_VERSION_VAR).unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            api_url,
            admin_api_key,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_fields() {
        let config = GhostConfig::new("https://demo.ghost.io", "abc:0123", "v5.0");
        assert_eq!(config.api_url, "https://demo.ghost.io");
        assert_eq!(config.admin_api_key, "abc:0123");
        assert_eq!(config.version, "v5.0");
    }

    #[test]
    fn test_default_version_constant() {
        assert_eq!(DEFAULT_API_VERSION, "v5.0");
    }
}
