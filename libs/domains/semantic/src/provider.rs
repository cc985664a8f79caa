use async_trait::async_trait;

use crate::error::SemanticResult;
use crate::models::{Embedding, InputKind};

/// Trait for embedding generation providers.
///
/// One implementation per upstream API; consumers depend on the trait so
/// retrieval logic can be tested without network access.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str, kind: InputKind) -> SemanticResult<Embedding>;
}
