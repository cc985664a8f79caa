//! # Axum Helpers
//!
//! Utilities shared by the HTTP surface of the workspace:
//!
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)
//! - **[`server`]**: health endpoints and server bootstrap with graceful
//!   shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use server::{health_router, serve, shutdown_signal, HealthResponse};
