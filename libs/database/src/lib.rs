//! PostgreSQL connection management and shared persistence utilities.
//!
//! Provides connection pooling, startup retry, migration running, health
//! checks and classification of SQL constraint violations so domain crates
//! can map them to their own error types.

pub mod common;
pub mod postgres;

pub use common::{classify_db_err, DatabaseError, DatabaseResult, RetryConfig, SqlViolation};
