//! # quill-api
//!
//! HTTP client for the tenant-scoped posts resource. Injects the session's
//! bearer token and `domain` tenant header on every call, and retries exactly
//! once after a 401 by refreshing the session through `quill-auth`.

mod client;
pub mod error;
mod posts;

pub use client::ApiClient;
pub use error::ApiError;
