use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use quill_auth::{SessionManager, claims};

use crate::error::ApiError;

const API_PATH: &str = "/api";
const DOMAIN_HEADER: &str = "domain";

/// Client for the tenant-scoped resource API.
///
/// Every call goes through one request helper that merges headers (content
/// type default, then auth, then tenant, then caller overrides), and retries
/// exactly once after a 401 by refreshing the session.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<SessionManager>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    /// Issue a request and decode the JSON response body.
    ///
    /// `overrides` win over every derived header.
    ///
    /// # Errors
    ///
    /// `ApiError::Status` for a terminal non-2xx, `Auth` when the mid-request
    /// refresh fails, `Network`/`Decode` for transport and body errors.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        overrides: Option<&HeaderMap>,
    ) -> Result<T, ApiError> {
        let resp = self.execute(method, endpoint, body, overrides).await?;
        resp.json().await.map_err(|e| {
            if e.is_decode() {
                ApiError::Decode(e.to_string())
            } else {
                ApiError::Network(e)
            }
        })
    }

    /// Issue a request and return the raw response, body untouched.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        overrides: Option<&HeaderMap>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{API_PATH}{endpoint}", self.base_url);
        let headers = self.build_headers(endpoint, overrides);
        let first = self.send(method.clone(), &url, headers, body).await?;

        if first.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(endpoint, "received 401; refreshing session");
            self.session.refresh().await?;

            // Headers rebuilt from the now-updated store. One retry only.
            let headers = self.build_headers(endpoint, overrides);
            let retry = self.send(method, &url, headers, body).await?;
            if !retry.status().is_success() {
                return Err(ApiError::Status(retry.status().as_u16()));
            }
            return Ok(retry);
        }

        if !first.status().is_success() {
            return Err(ApiError::Status(first.status().as_u16()));
        }
        Ok(first)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    fn build_headers(&self, endpoint: &str, overrides: Option<&HeaderMap>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(self.session.auth_headers());

        if !is_auth_endpoint(endpoint) {
            if let Some(tenant) = self.tenant_header() {
                headers.insert(HeaderName::from_static(DOMAIN_HEADER), tenant);
            }
        }

        if let Some(overrides) = overrides {
            headers.extend(overrides.clone());
        }
        headers
    }

    /// Tenant scope from the persisted access token: the first `domains`
    /// entry. Absent when the user has no domains or the token does not
    /// decode; never fabricated.
    fn tenant_header(&self) -> Option<HeaderValue> {
        let token = self.session.access_token()?;
        let decoded = match claims::decode(&token) {
            Ok(decoded) => decoded,
            Err(error) => {
                tracing::warn!(%error, "access token decode failed; omitting tenant header");
                return None;
            }
        };
        let Some(uuid) = decoded.tenant() else {
            tracing::warn!("user has no domains assigned");
            return None;
        };
        match HeaderValue::from_str(uuid) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%error, "tenant UUID is not a valid header value");
                None
            }
        }
    }
}

/// Session endpoints never carry the tenant header.
fn is_auth_endpoint(endpoint: &str) -> bool {
    endpoint.starts_with("/auth")
        || endpoint.contains("/login")
        || endpoint.contains("/register")
        || endpoint.contains("/refresh")
        || endpoint.contains("/logout")
}
