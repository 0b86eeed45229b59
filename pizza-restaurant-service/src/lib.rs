pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod seed;
pub mod store;

pub use db::{create_pool, create_pool_with_timeout, run_migrations, DbPool};
pub use error::{StoreError, ValidationError};

/// Local file database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "app.db";
