//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Hive API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hive API",
        version = "0.1.0",
        description = "Connector catalog with semantic retrieval"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/api/v1", api = domain_catalog::handlers::ApiDoc),
        (path = "/api/v1", api = domain_retrieval::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
