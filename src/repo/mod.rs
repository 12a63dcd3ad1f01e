// Repository pattern - isolates all database side effects
pub mod posts;
pub mod users;

pub use posts::{NewPost, PostRepository, SqlitePostRepository};
pub use users::{NewUser, SqliteUserRepository, UserRepository};

use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Type aliases for Arc-wrapped repositories (for AppState)
pub type DynUserRepository = Arc<dyn UserRepository>;
pub type DynPostRepository = Arc<dyn PostRepository>;

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
