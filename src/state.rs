use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::Config;
use crate::repo::{DynPostRepository, DynUserRepository};
use crate::storage::FileStore;

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub users: DynUserRepository,
    pub posts: DynPostRepository,
    pub files: FileStore,
    pub config: Config,
}
