//! Posts service endpoint configuration.

use serde::{Deserialize, Serialize};

/// Default request timeout.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Base URL of the posts service (e.g. `http://localhost:8080`).
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Check if the server config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ServerConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn configured_when_base_url_set() {
        let config = ServerConfig {
            base_url: "http://localhost:8080".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
