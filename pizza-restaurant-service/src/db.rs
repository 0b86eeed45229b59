use diesel::connection::SimpleConnection;
use std::time::Duration;

use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::error::StoreError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const IN_MEMORY_DATABASE_URL: &str = ":memory:";

pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Turns on foreign key enforcement, which SQLite leaves off per connection.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str) -> Result<DbPool, StoreError> {
    create_pool_with_timeout(database_url, DEFAULT_CONNECTION_TIMEOUT)
}

/// Like [`create_pool`], but waits at most `connection_timeout` for a free
/// connection on checkout.
pub fn create_pool_with_timeout(
    database_url: &str,
    connection_timeout: Duration,
) -> Result<DbPool, StoreError> {
    // every connection to ":memory:" opens a separate database
    let max_size = if database_url == IN_MEMORY_DATABASE_URL {
        1
    } else {
        5
    };

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_timeout(connection_timeout)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;
    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;
    for version in applied {
        info!(%version, "Applied migration");
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    let pool = create_pool(IN_MEMORY_DATABASE_URL).unwrap();
    run_migrations(&pool).unwrap();
    pool
}
