use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author summary embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A post as served by the tenant-scoped `/api/post` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: i64,
    pub uuid: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "userID", default)]
    pub user_id: i64,
    #[serde(default)]
    pub user: Option<PostAuthor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /api/post`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
}

/// Payload for `PUT /api/post/:uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePost {
    pub title: String,
    pub content: String,
}
