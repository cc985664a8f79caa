use sea_orm::{DbErr, SqlErr};

/// Unified error type for database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] DbErr),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Classification of a [`DbErr`] by the SQL condition behind it.
///
/// Domain repositories use this to translate driver errors into their own
/// error enums (409 for unique violations, 404 for missing foreign keys,
/// retry for serialization failures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlViolation {
    /// Unique constraint violation (SQLSTATE 23505)
    Unique,
    /// Foreign key constraint violation (SQLSTATE 23503)
    ForeignKey,
    /// Serialization failure under SERIALIZABLE isolation (SQLSTATE 40001)
    Serialization,
    /// Query expected a row and found none
    RowNotFound,
    /// Anything else
    Other,
}

/// Classifies a SeaORM error by the underlying SQL condition.
///
/// SeaORM surfaces unique and foreign key violations through
/// [`DbErr::sql_err`]. Serialization failures are not mapped there, so they
/// are detected from the error text (SQLSTATE 40001).
pub fn classify_db_err(err: &DbErr) -> SqlViolation {
    if let Some(sql_err) = err.sql_err() {
        return match sql_err {
            SqlErr::UniqueConstraintViolation(_) => SqlViolation::Unique,
            SqlErr::ForeignKeyConstraintViolation(_) => SqlViolation::ForeignKey,
            _ => SqlViolation::Other,
        };
    }

    if matches!(err, DbErr::RecordNotFound(_)) {
        return SqlViolation::RowNotFound;
    }

    let text = err.to_string();
    if text.contains("40001") || text.contains("could not serialize access") {
        return SqlViolation::Serialization;
    }

    SqlViolation::Other
}
