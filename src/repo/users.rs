use async_trait::async_trait;
use rusqlite::params;

use crate::db::models::User;
use crate::state::DbPool;

use super::{is_unique_violation, RepositoryError};

/// Fields for a registration insert. `password` is already hashed
/// by the time it reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Look up a user whose email OR username equals `identifier`
    async fn find_by_identifier(&self, identifier: &str)
        -> Result<Option<User>, RepositoryError>;

    /// Insert a new user, returning the stored row.
    /// A duplicate email surfaces as `RepositoryError::Conflict` via the
    /// unique constraint, independent of any look-aside check.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;
}

/// SQLite implementation
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
    })
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let conn = self.pool.get()?;

        let result = conn.query_row(
            "SELECT id, username, email, password FROM users WHERE email = ?1",
            params![email],
            user_from_row,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let conn = self.pool.get()?;

        let result = conn.query_row(
            "SELECT id, username, email, password FROM users
             WHERE email = ?1 OR username = ?1",
            params![identifier],
            user_from_row,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let conn = self.pool.get()?;

        let result = conn.query_row(
            "INSERT INTO users (username, email, password)
             VALUES (?1, ?2, ?3)
             RETURNING id, username, email, password",
            params![user.username, user.email, user.password],
            user_from_row,
        );

        match result {
            Ok(user) => Ok(user),
            Err(ref e) if is_unique_violation(e) => {
                Err(RepositoryError::Conflict("User already exists".into()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
