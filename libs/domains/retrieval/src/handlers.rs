//! HTTP endpoint for semantic connector retrieval.

use axum::{extract::State, routing::post, Json, Router};
use axum_helpers::{ErrorResponse, ValidatedJson};
use domain_semantic::Embedder;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RetrievalResult;
use crate::models::{ApplicationSelector, RetrievalFilter, RetrieveRequest, RetrievedConnector};
use crate::repository::RetrievalRepository;
use crate::service::RetrievalService;

/// OpenAPI documentation for the retrieval API
#[derive(OpenApi)]
#[openapi(
    paths(retrieve_connectors),
    components(schemas(
        RetrieveRequest,
        RetrievalFilter,
        ApplicationSelector,
        RetrievedConnector,
        ErrorResponse,
    )),
    tags(
        (name = "retrieval", description = "Semantic connector retrieval"),
    )
)]
pub struct ApiDoc;

/// Create the retrieval router
pub fn router<R, E>(service: RetrievalService<R, E>) -> Router
where
    R: RetrievalRepository + 'static,
    E: Embedder + 'static,
{
    Router::new()
        .route("/retrieval", post(retrieve_connectors))
        .with_state(Arc::new(service))
}

/// Retrieve connectors relevant to a natural-language query
#[utoipa::path(
    post,
    path = "/retrieval",
    tag = "retrieval",
    request_body = RetrieveRequest,
    responses(
        (status = 200, description = "Connectors ordered by descending similarity", body = Vec<RetrievedConnector>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 429, description = "Embedding provider rate limited", body = ErrorResponse),
        (status = 503, description = "Embedding provider unavailable", body = ErrorResponse)
    )
)]
pub(crate) async fn retrieve_connectors<R, E>(
    State(service): State<Arc<RetrievalService<R, E>>>,
    ValidatedJson(request): ValidatedJson<RetrieveRequest>,
) -> RetrievalResult<Json<Vec<RetrievedConnector>>>
where
    R: RetrievalRepository,
    E: Embedder,
{
    let connectors = service.retrieve(request).await?;
    Ok(Json(connectors))
}
