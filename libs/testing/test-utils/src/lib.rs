//! Shared test utilities for domain testing.
//!
//! Provides [`TestDatabase`], a pgvector-enabled PostgreSQL container with
//! the workspace migrations applied.
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::TestDatabase;
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! // Pass db.connection() to your repository
//! # }
//! ```

mod postgres;

pub use postgres::TestDatabase;
