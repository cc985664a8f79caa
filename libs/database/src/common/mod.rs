//! Utilities shared across persistence code.

pub mod error;
pub mod retry;

pub use error::{classify_db_err, DatabaseError, DatabaseResult, SqlViolation};
pub use retry::{retry, retry_with_backoff, RetryConfig};
