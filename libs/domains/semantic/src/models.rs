use serde::{Deserialize, Serialize};

use crate::error::{SemanticError, SemanticResult};

/// Number of dimensions produced by the configured embedding model.
pub const EMBEDDING_DIMENSION: usize = 384;

/// Purpose of an embedding request.
///
/// Asymmetric embedding models encode stored documents and search queries
/// differently; mixing the two degrades retrieval quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Text stored in the index (connector descriptions).
    Document,
    /// Text used to search the index.
    Query,
}

/// A dense embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Wraps raw provider output, rejecting vectors of the wrong dimension.
    pub fn new(values: Vec<f32>) -> SemanticResult<Self> {
        if values.len() != EMBEDDING_DIMENSION {
            return Err(SemanticError::InvalidResponse(format!(
                "expected {} dimensions, got {}",
                EMBEDDING_DIMENSION,
                values.len()
            )));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Renders the vector as a pgvector literal, e.g. `[0.1,0.2,0.3]`.
    ///
    /// Bound as a text parameter and cast with `$n::vector` in queries,
    /// since the driver has no native pgvector type.
    pub fn to_pgvector_literal(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 8 + 2);
        out.push('[');
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&v.to_string());
        }
        out.push(']');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_rejects_wrong_dimension() {
        let err = Embedding::new(vec![0.0; 3]).unwrap_err();
        assert!(err.to_string().contains("384"));
    }

    #[test]
    fn test_embedding_accepts_full_dimension() {
        assert!(Embedding::new(vec![0.5; EMBEDDING_DIMENSION]).is_ok());
    }

    #[test]
    fn test_pgvector_literal_format() {
        let mut values = vec![0.0; EMBEDDING_DIMENSION];
        values[0] = 1.0;
        values[1] = -0.5;
        let literal = Embedding::new(values).unwrap().to_pgvector_literal();
        assert!(literal.starts_with("[1,-0.5,0,"));
        assert!(literal.ends_with(']'));
        assert_eq!(literal.matches(',').count(), EMBEDDING_DIMENSION - 1);
    }
}
