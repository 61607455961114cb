//! Entity structs for the posts resource.
//!
//! Shapes match the JSON the posts service serves under `/api/post`. All
//! structs derive `Serialize` and `Deserialize` for wire roundtrip.

mod post;

pub use post::{CreatePost, Post, PostAuthor, UpdatePost};
