use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{ApplicationVersion, CreateVersion, ListVersionsQuery};
use crate::repository::VersionRepository;
use crate::service::VersionService;

/// Create the version router
pub fn router<R: VersionRepository + 'static>(service: VersionService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/applications/{id}/versions",
            get(list_versions).post(create_version),
        )
        .route(
            "/applications/{id}/versions/latest",
            get(get_latest_version),
        )
        .route(
            "/applications/{id}/versions/{version}",
            get(get_version_by_number),
        )
        .route("/versions/{id}", get(get_version).delete(delete_version))
        .with_state(shared_service)
}

/// List versions of an application by number descending, with keyset
/// pagination
#[utoipa::path(
    get,
    path = "/applications/{id}/versions",
    tag = "versions",
    params(
        ("id" = Uuid, Path, description = "Application ID"),
        ListVersionsQuery
    ),
    responses(
        (status = 200, description = "List of versions", body = Vec<ApplicationVersion>),
        (status = 400, description = "Invalid page size", body = ErrorResponse)
    )
)]
pub(super) async fn list_versions<R: VersionRepository>(
    State(service): State<Arc<VersionService<R>>>,
    UuidPath(id): UuidPath,
    Query(query): Query<ListVersionsQuery>,
) -> CatalogResult<Json<Vec<ApplicationVersion>>> {
    let versions = service
        .list_versions(id, query.limit, query.last_version)
        .await?;
    Ok(Json(versions))
}

/// Create a version, auto-allocating the number unless one is given
#[utoipa::path(
    post,
    path = "/applications/{id}/versions",
    tag = "versions",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = CreateVersion,
    responses(
        (status = 201, description = "Version created", body = ApplicationVersion),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Version number already exists", body = ErrorResponse),
        (status = 429, description = "Too many concurrent allocations", body = ErrorResponse)
    )
)]
pub(super) async fn create_version<R: VersionRepository>(
    State(service): State<Arc<VersionService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateVersion>,
) -> CatalogResult<impl IntoResponse> {
    let version = service.create_version(id, input).await?;
    Ok((StatusCode::CREATED, Json(version)))
}

/// Get the highest-numbered version of an application
#[utoipa::path(
    get,
    path = "/applications/{id}/versions/latest",
    tag = "versions",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Latest version", body = ApplicationVersion),
        (status = 404, description = "Application has no versions", body = ErrorResponse)
    )
)]
pub(super) async fn get_latest_version<R: VersionRepository>(
    State(service): State<Arc<VersionService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ApplicationVersion>> {
    let version = service.get_latest_version(id).await?;
    Ok(Json(version))
}

/// Get a version by application and number
#[utoipa::path(
    get,
    path = "/applications/{id}/versions/{version}",
    tag = "versions",
    params(
        ("id" = Uuid, Path, description = "Application ID"),
        ("version" = i32, Path, description = "Version number")
    ),
    responses(
        (status = 200, description = "Version found", body = ApplicationVersion),
        (status = 404, description = "Version not found", body = ErrorResponse)
    )
)]
pub(super) async fn get_version_by_number<R: VersionRepository>(
    State(service): State<Arc<VersionService<R>>>,
    Path((id, version)): Path<(Uuid, i32)>,
) -> CatalogResult<Json<ApplicationVersion>> {
    let version = service.get_version_by_number(id, version).await?;
    Ok(Json(version))
}

/// Get a version by ID
#[utoipa::path(
    get,
    path = "/versions/{id}",
    tag = "versions",
    params(("id" = Uuid, Path, description = "Version ID")),
    responses(
        (status = 200, description = "Version found", body = ApplicationVersion),
        (status = 404, description = "Version not found", body = ErrorResponse)
    )
)]
pub(super) async fn get_version<R: VersionRepository>(
    State(service): State<Arc<VersionService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ApplicationVersion>> {
    let version = service.get_version(id).await?;
    Ok(Json(version))
}

/// Delete a version and its connectors
#[utoipa::path(
    delete,
    path = "/versions/{id}",
    tag = "versions",
    params(("id" = Uuid, Path, description = "Version ID")),
    responses(
        (status = 204, description = "Version deleted"),
        (status = 404, description = "Version not found", body = ErrorResponse)
    )
)]
pub(super) async fn delete_version<R: VersionRepository>(
    State(service): State<Arc<VersionService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete_version(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
