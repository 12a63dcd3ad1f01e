use async_trait::async_trait;
use rusqlite::params;

use crate::db::models::Post;
use crate::state::DbPool;

use super::RepositoryError;

/// Scalar fields for an insert or full-row update. The handler decides
/// what `image_url` carries: a freshly stored path, the re-read previous
/// value, or None.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub content: String,
    pub fulltext: String,
    pub image_url: Option<String>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in storage order
    async fn list(&self) -> Result<Vec<Post>, RepositoryError>;

    /// Single post by id
    async fn find(&self, id: i64) -> Result<Option<Post>, RepositoryError>;

    /// Insert one row, returning it
    async fn create(&self, post: NewPost) -> Result<Post, RepositoryError>;

    /// Full-row update keyed by id; Ok(None) when no row matched
    async fn update(&self, id: i64, post: NewPost) -> Result<Option<Post>, RepositoryError>;

    /// Delete by id; false when no row matched
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// SQLite implementation
pub struct SqlitePostRepository {
    pool: DbPool,
}

impl SqlitePostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        content: row.get(3)?,
        image_url: row.get(4)?,
        fulltext: row.get(5)?,
    })
}

const POST_COLUMNS: &str = "id, title, author, content, image_url, fulltext";

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts"))?;
        let posts = stmt
            .query_map([], post_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    async fn find(&self, id: i64) -> Result<Option<Post>, RepositoryError> {
        let conn = self.pool.get()?;

        let result = conn.query_row(
            &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"),
            params![id],
            post_from_row,
        );

        match result {
            Ok(post) => Ok(Some(post)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepositoryError> {
        let conn = self.pool.get()?;

        let post = conn.query_row(
            &format!(
                "INSERT INTO posts (title, author, content, image_url, fulltext)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {POST_COLUMNS}"
            ),
            params![
                post.title,
                post.author,
                post.content,
                post.image_url,
                post.fulltext
            ],
            post_from_row,
        )?;

        Ok(post)
    }

    async fn update(&self, id: i64, post: NewPost) -> Result<Option<Post>, RepositoryError> {
        let conn = self.pool.get()?;

        let result = conn.query_row(
            &format!(
                "UPDATE posts
                 SET title = ?1, author = ?2, content = ?3, fulltext = ?4, image_url = ?5
                 WHERE id = ?6
                 RETURNING {POST_COLUMNS}"
            ),
            params![
                post.title,
                post.author,
                post.content,
                post.fulltext,
                post.image_url,
                id
            ],
            post_from_row,
        );

        match result {
            Ok(post) => Ok(Some(post)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let conn = self.pool.get()?;

        let rows = conn.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }
}
