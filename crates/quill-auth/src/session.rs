use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tokio::sync::watch;

use quill_core::identity::{AuthProvider, UserProfile};

use crate::claims;
use crate::error::AuthError;
use crate::token_store::TokenStore;

/// Published session state.
///
/// Owned by [`SessionManager`]; consumers observe through [`SessionManager::subscribe`]
/// and never mutate it directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
    /// A credential exchange is in flight.
    pub authenticating: bool,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Wire shape of `/login`, `/register`, and `/refresh` responses.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

/// Owns the persisted token pair and the shared session cell.
///
/// All state changes flow through here: the watch channel publishes each new
/// [`Session`] synchronously, so subscribers observe an update before the
/// mutating call returns.
pub struct SessionManager {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<Session>,
}

impl SessionManager {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let (state, _) = watch::channel(Session::default());
        Self {
            http,
            base_url,
            store,
            state,
        }
    }

    /// Observe session state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Pure read of the persisted access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.store.access_token()
    }

    /// Storage tier the current access token came from.
    #[must_use]
    pub fn token_source(&self) -> Option<&'static str> {
        self.store.source()
    }

    /// `Authorization: Bearer <token>` header, or an empty map when no access
    /// token is persisted.
    #[must_use]
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.store.access_token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(error) => {
                    tracing::warn!(%error, "stored access token is not a valid header value");
                }
            }
        }
        headers
    }

    /// Exchange credentials for a session via `POST /login`.
    ///
    /// On success both tokens are persisted, claims decoded, and an
    /// authenticated session published. On any failure (transport, non-2xx,
    /// token decode, store write) the empty session is published and no
    /// partial state is retained.
    ///
    /// # Errors
    ///
    /// Returns the underlying `AuthError`; state has already been reset.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.establish(
            "/login",
            &serde_json::json!({"email": email, "password": password}),
            AuthProvider::Local,
        )
        .await
    }

    /// Create an account via `POST /register`; same session contract as
    /// [`login`](Self::login), authenticated immediately on success.
    ///
    /// # Errors
    ///
    /// Returns the underlying `AuthError`; state has already been reset.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<(), AuthError> {
        self.establish(
            "/register",
            &serde_json::json!({"email": email, "password": password, "name": name}),
            AuthProvider::Local,
        )
        .await
    }

    async fn establish(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
        provider: AuthProvider,
    ) -> Result<(), AuthError> {
        self.state.send_modify(|session| session.authenticating = true);

        let outcome = async {
            let tokens = self.post_tokens(endpoint, body).await?;
            let profile = claims::decode(&tokens.access_token)?.to_profile(provider);
            self.store.save(&tokens.access_token, &tokens.refresh_token)?;
            Ok((tokens, profile))
        }
        .await;

        match outcome {
            Ok((tokens, profile)) => {
                self.state.send_replace(Session {
                    access_token: Some(tokens.access_token),
                    refresh_token: Some(tokens.refresh_token),
                    user: Some(profile),
                    authenticating: false,
                });
                Ok(())
            }
            Err(error) => {
                self.state.send_replace(Session::default());
                Err(error)
            }
        }
    }

    /// Mint a new token pair from the persisted refresh token.
    ///
    /// Republishes the access token only; the derived user is left as
    /// previously published. On failure the session is logged out as a side
    /// effect before the error is returned.
    ///
    /// # Errors
    ///
    /// `MissingRefreshToken` when the store has no refresh token; otherwise
    /// the transport/status/store error from the exchange.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let Some(refresh_token) = self.store.refresh_token() else {
            return Err(AuthError::MissingRefreshToken);
        };

        let outcome = async {
            let tokens = self
                .post_tokens("/refresh", &serde_json::json!({"token": refresh_token}))
                .await?;
            self.store.save(&tokens.access_token, &tokens.refresh_token)?;
            Ok(tokens)
        }
        .await;

        match outcome {
            Ok(TokenResponse {
                access_token,
                refresh_token,
            }) => {
                self.state.send_modify(move |session| {
                    session.access_token = Some(access_token);
                    session.refresh_token = Some(refresh_token);
                });
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "token refresh failed; clearing session");
                if let Err(logout_error) = self.logout().await {
                    tracing::warn!(%logout_error, "logout after failed refresh also failed");
                }
                Err(error)
            }
        }
    }

    /// Notify the server (best effort), then clear the store and publish the
    /// empty session. Local state is cleared even when the server call fails.
    ///
    /// # Errors
    ///
    /// Only a store clear failure is reported; server errors are suppressed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Some(token) = self.store.access_token() {
            let result = self
                .http
                .post(format!("{}/logout", self.base_url))
                .bearer_auth(&token)
                .send()
                .await;
            match result {
                Ok(resp) if !resp.status().is_success() => {
                    tracing::debug!(status = resp.status().as_u16(), "server logout rejected");
                }
                Err(error) => {
                    tracing::debug!(%error, "server logout unreachable");
                }
                Ok(_) => {}
            }
        }

        let cleared = self.store.clear();
        self.state.send_replace(Session::default());
        cleared
    }

    /// Adopt a token pair handed over by a federated-login callback.
    ///
    /// Tokens are persisted first; the identity is derived through the lossy
    /// decode, so a malformed token of any shape yields the placeholder user
    /// rather than failing the call. The new state is visible to subscribers
    /// before this returns.
    ///
    /// # Errors
    ///
    /// Only a store write failure is reported.
    pub fn handle_social_auth(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        self.store.save(access_token, refresh_token)?;
        let profile = claims::decode_lossy(access_token);
        self.state.send_replace(Session {
            access_token: Some(access_token.to_owned()),
            refresh_token: Some(refresh_token.to_owned()),
            user: Some(profile),
            authenticating: false,
        });
        Ok(())
    }

    async fn post_tokens(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<TokenResponse, AuthError> {
        let resp = self
            .http
            .post(format!("{}{endpoint}", self.base_url))
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AuthError::BadStatus(resp.status().as_u16()));
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn manager_with_store(store: MemoryStore) -> SessionManager {
        SessionManager::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1",
            Arc::new(store),
        )
    }

    #[test]
    fn initial_session_is_empty() {
        let manager = manager_with_store(MemoryStore::new());
        let session = manager.current();
        assert!(!session.is_authenticated());
        assert!(session.user.is_none());
        assert!(!session.authenticating);
    }

    #[test]
    fn auth_headers_empty_without_token() {
        let manager = manager_with_store(MemoryStore::new());
        assert!(manager.auth_headers().is_empty());
    }

    #[test]
    fn auth_headers_carry_bearer_token() {
        let manager = manager_with_store(MemoryStore::with_tokens("tok123", "ref456"));
        let headers = manager.auth_headers();
        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer tok123")
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let manager = SessionManager::new(
            reqwest::Client::new(),
            "http://localhost:8080/",
            Arc::new(MemoryStore::new()),
        );
        assert_eq!(manager.base_url, "http://localhost:8080");
    }

    #[test]
    fn social_auth_publishes_before_returning() {
        let manager = manager_with_store(MemoryStore::new());
        let mut receiver = manager.subscribe();

        manager
            .handle_social_auth("not-a-jwt", "r1")
            .expect("store save");

        assert!(receiver.has_changed().expect("sender alive"));
        let session = receiver.borrow_and_update().clone();
        assert!(session.is_authenticated());
        assert_eq!(session.user, Some(UserProfile::unknown()));
        assert_eq!(manager.access_token().as_deref(), Some("not-a-jwt"));
    }
}
