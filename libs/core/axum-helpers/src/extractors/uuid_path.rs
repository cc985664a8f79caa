use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::errors::AppError;

/// Path extractor for a single UUID segment.
///
/// Unlike `Path<Uuid>`, a malformed UUID yields a structured 400 response
/// instead of axum's default path rejection.
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let id = Uuid::parse_str(&raw)?;
        Ok(UuidPath(id))
    }
}
