//! Embedding client for semantic retrieval.
//!
//! Defines the [`Embedder`] trait consumed by the catalog and retrieval
//! domains, plus the Cohere v2 HTTP implementation.

pub mod cohere;
pub mod error;
pub mod models;
pub mod provider;

pub use cohere::{CohereClient, CohereConfig};
pub use error::{SemanticError, SemanticResult};
pub use models::{Embedding, InputKind};
pub use provider::Embedder;

#[cfg(feature = "mocks")]
pub use provider::MockEmbedder;
