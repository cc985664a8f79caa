use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_semantic::SemanticError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] SemanticError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Convert RetrievalError to AppError for standardized error responses
impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::Validation(msg) => AppError::BadRequest(msg),
            RetrievalError::Embedding(e) => match e {
                SemanticError::RateLimited(msg) => {
                    AppError::TooManyRequests(format!("embedding provider rate limited: {}", msg))
                }
                SemanticError::ProviderUnavailable(msg) => {
                    AppError::ServiceUnavailable(format!("embedding provider unavailable: {}", msg))
                }
                other => AppError::InternalServerError(other.to_string()),
            },
            RetrievalError::Database(e) => {
                AppError::InternalServerError(format!("Database error: {}", e))
            }
        }
    }
}

impl IntoResponse for RetrievalError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
