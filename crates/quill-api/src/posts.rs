use reqwest::Method;

use quill_core::entities::{CreatePost, Post, UpdatePost};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// List posts in the current tenant.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.request(Method::GET, "/post", None, None).await
    }

    /// Fetch a single post by uuid.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get_post(&self, uuid: &str) -> Result<Post, ApiError> {
        self.request(Method::GET, &format!("/post/{uuid}"), None, None)
            .await
    }

    /// Create a post.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn create_post(&self, payload: &CreatePost) -> Result<Post, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.request(Method::POST, "/post", Some(&body), None).await
    }

    /// Replace a post's title and content.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn update_post(&self, uuid: &str, payload: &UpdatePost) -> Result<Post, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.request(Method::PUT, &format!("/post/{uuid}"), Some(&body), None)
            .await
    }

    /// Delete a post. The response body is discarded.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete_post(&self, uuid: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &format!("/post/{uuid}"), None, None)
            .await
            .map(|_| ())
    }
}
