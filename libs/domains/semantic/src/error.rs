use thiserror::Error;

#[derive(Debug, Error)]
pub enum SemanticError {
    /// Provider rejected the request due to quota or rate limits (HTTP 429).
    /// Retryable by the caller, never retried at this layer.
    #[error("Embedding provider rate limited: {0}")]
    RateLimited(String),

    /// Provider unreachable or returned a non-success status.
    #[error("Embedding provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered but the payload did not match expectations.
    #[error("Invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type SemanticResult<T> = Result<T, SemanticError>;
