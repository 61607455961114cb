use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::AuthError;

pub const DEFAULT_KEYRING_SERVICE: &str = "quill-cli";

const KEYRING_ACCESS_USER: &str = "access-token";
const KEYRING_REFRESH_USER: &str = "refresh-token";
const ACCESS_FILE_NAME: &str = "access_token";
const REFRESH_FILE_NAME: &str = "refresh_token";
const ACCESS_ENV: &str = "QUILL_AUTH__ACCESS_TOKEN";
const REFRESH_ENV: &str = "QUILL_AUTH__REFRESH_TOKEN";

/// Persistent storage for the two session credentials.
///
/// Exactly two string slots: the access token and the refresh token. The
/// session manager owns a store instance; implementations only promise
/// per-slot atomicity, nothing transactional across the pair.
pub trait TokenStore: Send + Sync {
    /// Persist both tokens, overwriting previous values.
    fn save(&self, access: &str, refresh: &str) -> Result<(), AuthError>;

    fn access_token(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;

    /// Remove both tokens. Must leave the store empty even if one slot was
    /// already absent.
    fn clear(&self) -> Result<(), AuthError>;

    /// Which tier the current access token came from, for status display.
    fn source(&self) -> Option<&'static str>;
}

/// Tiered credential storage: OS keychain, environment, file.
///
/// Stores prefer the keychain and fall back to a 0600 file under the
/// credentials directory (`~/.quill` by default). Loads check keychain,
/// then `QUILL_AUTH__ACCESS_TOKEN`/`QUILL_AUTH__REFRESH_TOKEN`, then the
/// file tier.
pub struct KeyringStore {
    service: String,
    credentials_dir: Option<PathBuf>,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(DEFAULT_KEYRING_SERVICE)
    }
}

impl KeyringStore {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            credentials_dir: None,
        }
    }

    /// Override the file-tier directory (tests, or `auth.credentials_dir`
    /// config).
    #[must_use]
    pub fn with_credentials_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.credentials_dir = Some(dir.into());
        self
    }

    fn credentials_dir(&self) -> Result<PathBuf, AuthError> {
        if let Some(dir) = &self.credentials_dir {
            return Ok(dir.clone());
        }
        dirs::home_dir().map(|h| h.join(".quill")).ok_or_else(|| {
            AuthError::TokenStore("home directory not found — cannot store credentials".into())
        })
    }

    fn store_slot(&self, user: &str, file_name: &str, value: &str) -> Result<(), AuthError> {
        match keyring::Entry::new(&self.service, user) {
            Ok(entry) => match entry.set_password(value) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, slot = user, "keyring store failed; falling back to file");
                    self.store_file(file_name, value)
                }
            },
            Err(error) => {
                tracing::warn!(%error, slot = user, "keyring unavailable; falling back to file");
                self.store_file(file_name, value)
            }
        }
    }

    fn load_slot(&self, user: &str, env_var: &str, file_name: &str) -> Option<String> {
        // 1. Keyring
        if let Ok(entry) = keyring::Entry::new(&self.service, user) {
            if let Ok(token) = entry.get_password() {
                if !token.is_empty() {
                    return Some(token);
                }
            }
        }

        // 2. Environment variable
        if let Ok(token) = std::env::var(env_var) {
            if !token.is_empty() {
                return Some(token);
            }
        }

        // 3. File fallback
        self.load_file(file_name)
    }

    fn clear_slot(&self, user: &str, file_name: &str) -> Result<(), AuthError> {
        // Keyring entry may not exist; ignore errors
        if let Ok(entry) = keyring::Entry::new(&self.service, user) {
            let _ = entry.delete_credential();
        }

        let path = self.credentials_dir()?.join(file_name);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                AuthError::TokenStore(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn store_file(&self, file_name: &str, value: &str) -> Result<(), AuthError> {
        let dir = self.credentials_dir()?;
        fs::create_dir_all(&dir)
            .map_err(|e| AuthError::TokenStore(format!("mkdir {}: {e}", dir.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", dir.display());
            }
        }

        let path = dir.join(file_name);
        fs::write(&path, value)
            .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(|e| AuthError::TokenStore(format!("chmod {}: {e}", path.display())))?;
        }

        Ok(())
    }

    fn load_file(&self, file_name: &str) -> Option<String> {
        let path = self.credentials_dir().ok()?.join(file_name);
        fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl TokenStore for KeyringStore {
    fn save(&self, access: &str, refresh: &str) -> Result<(), AuthError> {
        self.store_slot(KEYRING_ACCESS_USER, ACCESS_FILE_NAME, access)?;
        self.store_slot(KEYRING_REFRESH_USER, REFRESH_FILE_NAME, refresh)
    }

    fn access_token(&self) -> Option<String> {
        self.load_slot(KEYRING_ACCESS_USER, ACCESS_ENV, ACCESS_FILE_NAME)
    }

    fn refresh_token(&self) -> Option<String> {
        self.load_slot(KEYRING_REFRESH_USER, REFRESH_ENV, REFRESH_FILE_NAME)
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.clear_slot(KEYRING_ACCESS_USER, ACCESS_FILE_NAME)?;
        self.clear_slot(KEYRING_REFRESH_USER, REFRESH_FILE_NAME)
    }

    fn source(&self) -> Option<&'static str> {
        if let Ok(entry) = keyring::Entry::new(&self.service, KEYRING_ACCESS_USER) {
            if entry.get_password().is_ok_and(|t| !t.is_empty()) {
                return Some("keyring");
            }
        }
        if std::env::var(ACCESS_ENV).is_ok_and(|t| !t.is_empty()) {
            return Some("env");
        }
        if self.load_file(ACCESS_FILE_NAME).is_some() {
            return Some("file");
        }
        None
    }
}

/// In-process store for tests and embedding scenarios.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tokens: Mutex<(Option<String>, Option<String>)>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store.
    #[must_use]
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        Self {
            tokens: Mutex::new((Some(access.to_owned()), Some(refresh.to_owned()))),
        }
    }
}

impl TokenStore for MemoryStore {
    fn save(&self, access: &str, refresh: &str) -> Result<(), AuthError> {
        let mut tokens = self.tokens.lock().expect("token store lock poisoned");
        *tokens = (Some(access.to_owned()), Some(refresh.to_owned()));
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        self.tokens.lock().expect("token store lock poisoned").0.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.lock().expect("token store lock poisoned").1.clone()
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut tokens = self.tokens.lock().expect("token store lock poisoned");
        *tokens = (None, None);
        Ok(())
    }

    fn source(&self) -> Option<&'static str> {
        self.access_token().map(|_| "memory")
    }
}
