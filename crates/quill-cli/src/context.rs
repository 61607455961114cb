use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use quill_api::ApiClient;
use quill_auth::{KeyringStore, SessionManager};
use quill_config::QuillConfig;

/// Shared handles for command handlers: one session manager, one API client,
/// both built from the loaded configuration.
pub struct AppContext {
    pub session: Arc<SessionManager>,
    pub api: ApiClient,
}

impl AppContext {
    pub fn init(config: &QuillConfig) -> anyhow::Result<Self> {
        if !config.server.is_configured() {
            anyhow::bail!(
                "server.base_url is not configured — set QUILL_SERVER__BASE_URL or add [server] to .quill/config.toml"
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let mut store = KeyringStore::new(&config.auth.keyring_service);
        if !config.auth.credentials_dir.is_empty() {
            store = store.with_credentials_dir(config.auth.credentials_dir.clone());
        }

        let session = Arc::new(SessionManager::new(
            http.clone(),
            config.server.base_url.as_str(),
            Arc::new(store),
        ));
        let api = ApiClient::new(
            http,
            config.server.base_url.as_str(),
            Arc::clone(&session),
        );

        Ok(Self { session, api })
    }
}
