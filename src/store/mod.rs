#[cfg(test)]
pub mod memory;

/// Failure surfaced by a `UserStore` or `PostStore` implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate key")]
    DuplicateKey,

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateKey,
            _ => StoreError::Database(e),
        }
    }
}
