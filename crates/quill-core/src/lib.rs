//! # quill-core
//!
//! Foundational types shared across the Quill crates:
//! - Identity types derived from access token claims
//! - Entity structs for the posts resource and its request payloads
//!
//! This crate holds data only. Token handling lives in `quill-auth`, HTTP in
//! `quill-api`.

pub mod entities;
pub mod identity;
