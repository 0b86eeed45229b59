use diesel::r2d2::PoolError;

/// Rejections raised while building a record, before it reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Price must be between 1 and 30")]
    PriceOutOfRange(i32),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} is required")]
    Missing(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Database(diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("Migration failed: {0}")]
    Migration(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}
