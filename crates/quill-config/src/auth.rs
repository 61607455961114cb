//! Token storage configuration.

use serde::{Deserialize, Serialize};

fn default_keyring_service() -> String {
    "quill-cli".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// OS keychain service name. Override for tests to avoid touching real
    /// credentials.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Directory for the file-tier token fallback. Empty means `~/.quill`.
    #[serde(default)]
    pub credentials_dir: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            credentials_dir: String::new(),
        }
    }
}
