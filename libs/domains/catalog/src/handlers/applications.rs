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
use crate::models::{Application, CreateApplication, ListApplicationsQuery, UpdateApplication};
use crate::repository::ApplicationRepository;
use crate::service::ApplicationService;

/// Create the application router
pub fn router<R: ApplicationRepository + 'static>(service: ApplicationService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/applications",
            get(list_applications).post(create_application),
        )
        .route("/applications/by-name/{name}", get(get_application_by_name))
        .route(
            "/applications/{id}",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
        .with_state(shared_service)
}

/// List applications by name ascending, with keyset pagination
#[utoipa::path(
    get,
    path = "/applications",
    tag = "applications",
    params(ListApplicationsQuery),
    responses(
        (status = 200, description = "List of applications", body = Vec<Application>),
        (status = 400, description = "Invalid page size", body = ErrorResponse)
    )
)]
pub(super) async fn list_applications<R: ApplicationRepository>(
    State(service): State<Arc<ApplicationService<R>>>,
    Query(query): Query<ListApplicationsQuery>,
) -> CatalogResult<Json<Vec<Application>>> {
    let applications = service
        .list_applications(query.limit, query.last_name)
        .await?;
    Ok(Json(applications))
}

/// Create a new application
#[utoipa::path(
    post,
    path = "/applications",
    tag = "applications",
    request_body = CreateApplication,
    responses(
        (status = 201, description = "Application created", body = Application),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Name already exists", body = ErrorResponse)
    )
)]
pub(super) async fn create_application<R: ApplicationRepository>(
    State(service): State<Arc<ApplicationService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateApplication>,
) -> CatalogResult<impl IntoResponse> {
    let application = service.create_application(input).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// Get an application by ID
#[utoipa::path(
    get,
    path = "/applications/{id}",
    tag = "applications",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application found", body = Application),
        (status = 404, description = "Application not found", body = ErrorResponse)
    )
)]
pub(super) async fn get_application<R: ApplicationRepository>(
    State(service): State<Arc<ApplicationService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Application>> {
    let application = service.get_application(id).await?;
    Ok(Json(application))
}

/// Get an application by name
#[utoipa::path(
    get,
    path = "/applications/by-name/{name}",
    tag = "applications",
    params(("name" = String, Path, description = "Application name")),
    responses(
        (status = 200, description = "Application found", body = Application),
        (status = 404, description = "Application not found", body = ErrorResponse)
    )
)]
pub(super) async fn get_application_by_name<R: ApplicationRepository>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(name): Path<String>,
) -> CatalogResult<Json<Application>> {
    let application = service.get_application_by_name(&name).await?;
    Ok(Json(application))
}

/// Update an application's name or description
#[utoipa::path(
    put,
    path = "/applications/{id}",
    tag = "applications",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplication,
    responses(
        (status = 200, description = "Application updated", body = Application),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Name already exists", body = ErrorResponse)
    )
)]
pub(super) async fn update_application<R: ApplicationRepository>(
    State(service): State<Arc<ApplicationService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateApplication>,
) -> CatalogResult<Json<Application>> {
    let application = service.update_application(id, input).await?;
    Ok(Json(application))
}

/// Delete an application without versions
#[utoipa::path(
    delete,
    path = "/applications/{id}",
    tag = "applications",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Application still has versions", body = ErrorResponse)
    )
)]
pub(super) async fn delete_application<R: ApplicationRepository>(
    State(service): State<Arc<ApplicationService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete_application(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockApplicationRepository;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app_row(name: &str) -> Application {
        Application {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_router(repo: MockApplicationRepository) -> Router {
        router(ApplicationService::new(Arc::new(repo)))
    }

    #[tokio::test]
    async fn test_create_application_returns_201() {
        let mut repo = MockApplicationRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(app_row(&input.name)));

        let response = test_router(repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/applications")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"gmail"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let application: Application = serde_json::from_slice(&body).unwrap();
        assert_eq!(application.name, "gmail");
    }

    #[tokio::test]
    async fn test_create_application_empty_name_returns_400() {
        let mut repo = MockApplicationRepository::new();
        repo.expect_create().times(0);

        let response = test_router(repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/applications")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_application_malformed_id_returns_400() {
        let mut repo = MockApplicationRepository::new();
        repo.expect_get_by_id().times(0);

        let response = test_router(repo)
            .oneshot(
                Request::builder()
                    .uri("/applications/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_application_unknown_id_returns_404() {
        let mut repo = MockApplicationRepository::new();
        repo.expect_get_by_id().times(1).returning(|_| Ok(None));

        let response = test_router(repo)
            .oneshot(
                Request::builder()
                    .uri(format!("/applications/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

