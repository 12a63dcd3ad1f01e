use serde::{Deserialize, Serialize};

/// A registered account. The stored bcrypt hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// A blog article. `content` is the summary shown in listings,
/// `fulltext` the complete body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub image_url: Option<String>,
    pub fulltext: String,
}
