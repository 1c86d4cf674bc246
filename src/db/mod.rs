pub mod initialize;
pub mod log;
pub mod memory;
pub mod migrate;
pub mod pool;
pub mod stats;
pub mod store;

use crate::config::Config;
use crate::errors::AppResult;
use initialize::init_db;
use pool::DbPool;
use store::SqliteEventStore;

/// Open the configured database, apply pending migrations and wrap it in a store.
pub fn open_store(cfg: &Config) -> AppResult<SqliteEventStore> {
    let pool = DbPool::from_config(cfg)?;
    init_db(&pool.conn, cfg.offset()?)?;
    Ok(SqliteEventStore::new(pool))
}
