use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_semantic::SemanticError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Serializable transaction lost to a concurrent writer (SQLSTATE
    /// 40001). Internal signal for the allocator's retry loop; never
    /// surfaces over HTTP.
    #[error("Transaction serialization conflict")]
    SerializationConflict,

    /// Allocation retries exhausted under contention. Retryable by the
    /// client (HTTP 429).
    #[error("Too many concurrent version allocations, retry later")]
    TooManyConcurrentRequests,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] SemanticError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            CatalogError::Conflict(msg) => AppError::Conflict(msg),
            CatalogError::SerializationConflict | CatalogError::TooManyConcurrentRequests => {
                AppError::TooManyRequests(
                    "too many concurrent version allocations, retry later".to_string(),
                )
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Embedding(e) => match e {
                SemanticError::RateLimited(msg) => {
                    AppError::TooManyRequests(format!("embedding provider rate limited: {}", msg))
                }
                SemanticError::ProviderUnavailable(msg) => {
                    AppError::ServiceUnavailable(format!("embedding provider unavailable: {}", msg))
                }
                other => AppError::InternalServerError(other.to_string()),
            },
            CatalogError::Database(e) => {
                AppError::InternalServerError(format!("Database error: {}", e))
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_exhausted_allocation_maps_to_429() {
        let response = CatalogError::TooManyConcurrentRequests.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_rate_limited_embedding_maps_to_429() {
        let err = CatalogError::Embedding(SemanticError::RateLimited("quota".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_provider_unavailable_maps_to_503() {
        let err = CatalogError::Embedding(SemanticError::ProviderUnavailable("down".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
