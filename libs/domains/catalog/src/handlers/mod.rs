//! HTTP endpoints for the catalog domain.
//!
//! Three routers, one per sub-resource, each carrying its own service
//! state. The application merges them under a common prefix.

pub mod applications;
pub mod connectors;
pub mod versions;

use axum_helpers::ErrorResponse;
use utoipa::OpenApi;

use crate::models::{
    Application, ApplicationVersion, Connector, CreateApplication, CreateConnector, CreateVersion,
    UpdateApplication,
};

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        applications::list_applications,
        applications::create_application,
        applications::get_application,
        applications::get_application_by_name,
        applications::update_application,
        applications::delete_application,
        versions::list_versions,
        versions::create_version,
        versions::get_latest_version,
        versions::get_version_by_number,
        versions::get_version,
        versions::delete_version,
        connectors::list_connectors,
        connectors::create_connector,
        connectors::get_connector_by_name,
        connectors::list_connectors_by_name,
        connectors::get_connector,
        connectors::delete_connector,
    ),
    components(schemas(
        Application,
        ApplicationVersion,
        Connector,
        CreateApplication,
        CreateVersion,
        CreateConnector,
        UpdateApplication,
        ErrorResponse,
    )),
    tags(
        (name = "applications", description = "Application catalog endpoints"),
        (name = "versions", description = "Application version endpoints"),
        (name = "connectors", description = "Connector endpoints"),
    )
)]
pub struct ApiDoc;
