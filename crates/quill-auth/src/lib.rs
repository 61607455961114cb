//! # quill-auth
//!
//! Session lifecycle for the Quill client: credential exchange against the
//! posts service (`/login`, `/register`, `/refresh`, `/logout`), access token
//! claims decoding (`base64` payload segment, never signature-validated),
//! tiered token storage (`keyring` with env and file fallback), and a shared
//! reactive session cell (`tokio::sync::watch`).

pub mod claims;
pub mod error;
pub mod session;
pub mod token_store;

pub use claims::AccessClaims;
pub use error::AuthError;
pub use session::{Session, SessionManager};
pub use token_store::{KeyringStore, MemoryStore, TokenStore};
