use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use domain_semantic::Embedder;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{
    Connector, CreateConnector, ListConnectorsByNameQuery, ListConnectorsQuery,
};
use crate::repository::ConnectorRepository;
use crate::service::ConnectorService;

/// Create the connector router
pub fn router<R, E>(service: ConnectorService<R, E>) -> Router
where
    R: ConnectorRepository + 'static,
    E: Embedder + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/versions/{id}/connectors",
            get(list_connectors).post(create_connector),
        )
        .route(
            "/versions/{id}/connectors/by-name/{name}",
            get(get_connector_by_name),
        )
        .route(
            "/connectors/by-name/{name}",
            get(list_connectors_by_name),
        )
        .route(
            "/connectors/{id}",
            get(get_connector).delete(delete_connector),
        )
        .with_state(shared_service)
}

/// List connectors of a version by name ascending, with keyset pagination
#[utoipa::path(
    get,
    path = "/versions/{id}/connectors",
    tag = "connectors",
    params(
        ("id" = Uuid, Path, description = "Version ID"),
        ListConnectorsQuery
    ),
    responses(
        (status = 200, description = "List of connectors", body = Vec<Connector>),
        (status = 400, description = "Invalid page size", body = ErrorResponse)
    )
)]
pub(super) async fn list_connectors<R, E>(
    State(service): State<Arc<ConnectorService<R, E>>>,
    UuidPath(id): UuidPath,
    Query(query): Query<ListConnectorsQuery>,
) -> CatalogResult<Json<Vec<Connector>>>
where
    R: ConnectorRepository,
    E: Embedder,
{
    let connectors = service
        .list_connectors(id, query.limit, query.last_name)
        .await?;
    Ok(Json(connectors))
}

/// Create a connector and its embedding index row
#[utoipa::path(
    post,
    path = "/versions/{id}/connectors",
    tag = "connectors",
    params(("id" = Uuid, Path, description = "Version ID")),
    request_body = CreateConnector,
    responses(
        (status = 201, description = "Connector created", body = Connector),
        (status = 404, description = "Version not found", body = ErrorResponse),
        (status = 409, description = "Connector name already exists", body = ErrorResponse),
        (status = 429, description = "Embedding provider rate limited", body = ErrorResponse),
        (status = 503, description = "Embedding provider unavailable", body = ErrorResponse)
    )
)]
pub(super) async fn create_connector<R, E>(
    State(service): State<Arc<ConnectorService<R, E>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateConnector>,
) -> CatalogResult<impl IntoResponse>
where
    R: ConnectorRepository,
    E: Embedder,
{
    let connector = service.create_connector(id, input).await?;
    Ok((StatusCode::CREATED, Json(connector)))
}

/// Get a connector by version and name
#[utoipa::path(
    get,
    path = "/versions/{id}/connectors/by-name/{name}",
    tag = "connectors",
    params(
        ("id" = Uuid, Path, description = "Version ID"),
        ("name" = String, Path, description = "Connector name")
    ),
    responses(
        (status = 200, description = "Connector found", body = Connector),
        (status = 404, description = "Connector not found", body = ErrorResponse)
    )
)]
pub(super) async fn get_connector_by_name<R, E>(
    State(service): State<Arc<ConnectorService<R, E>>>,
    Path((id, name)): Path<(Uuid, String)>,
) -> CatalogResult<Json<Connector>>
where
    R: ConnectorRepository,
    E: Embedder,
{
    let connector = service.get_connector_by_name(id, &name).await?;
    Ok(Json(connector))
}

/// List same-named connectors across versions by version descending, with
/// keyset pagination
#[utoipa::path(
    get,
    path = "/connectors/by-name/{name}",
    tag = "connectors",
    params(
        ("name" = String, Path, description = "Connector name"),
        ListConnectorsByNameQuery
    ),
    responses(
        (status = 200, description = "List of connectors", body = Vec<Connector>),
        (status = 400, description = "Invalid page size", body = ErrorResponse)
    )
)]
pub(super) async fn list_connectors_by_name<R, E>(
    State(service): State<Arc<ConnectorService<R, E>>>,
    Path(name): Path<String>,
    Query(query): Query<ListConnectorsByNameQuery>,
) -> CatalogResult<Json<Vec<Connector>>>
where
    R: ConnectorRepository,
    E: Embedder,
{
    let connectors = service
        .list_connectors_by_name(&name, query.limit, query.last_version)
        .await?;
    Ok(Json(connectors))
}

/// Get a connector by ID
#[utoipa::path(
    get,
    path = "/connectors/{id}",
    tag = "connectors",
    params(("id" = Uuid, Path, description = "Connector ID")),
    responses(
        (status = 200, description = "Connector found", body = Connector),
        (status = 404, description = "Connector not found", body = ErrorResponse)
    )
)]
pub(super) async fn get_connector<R, E>(
    State(service): State<Arc<ConnectorService<R, E>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Connector>>
where
    R: ConnectorRepository,
    E: Embedder,
{
    let connector = service.get_connector(id).await?;
    Ok(Json(connector))
}

/// Delete a connector and its index row
#[utoipa::path(
    delete,
    path = "/connectors/{id}",
    tag = "connectors",
    params(("id" = Uuid, Path, description = "Connector ID")),
    responses(
        (status = 204, description = "Connector deleted"),
        (status = 404, description = "Connector not found", body = ErrorResponse)
    )
)]
pub(super) async fn delete_connector<R, E>(
    State(service): State<Arc<ConnectorService<R, E>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse>
where
    R: ConnectorRepository,
    E: Embedder,
{
    service.delete_connector(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
