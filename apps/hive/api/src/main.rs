//! Hive API - connector catalog with semantic retrieval

use std::sync::Arc;

use axum::Router;
use axum_helpers::server::{health_router, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_catalog::{
    handlers as catalog_handlers, ApplicationService, ConnectorService, PgApplicationRepository,
    PgConnectorRepository, PgVersionRepository, VersionService,
};
use domain_retrieval::{handlers as retrieval_handlers, PgRetrievalRepository, RetrievalService};
use domain_semantic::CohereClient;
use migration::Migrator;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod health;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await?;
    database::postgres::run_migrations::<Migrator>(&db, "hive-api").await?;

    let embedder = Arc::new(CohereClient::new(config.cohere.clone()));

    let application_service =
        ApplicationService::new(Arc::new(PgApplicationRepository::new(db.clone())));
    let version_service = VersionService::new(Arc::new(PgVersionRepository::new(db.clone())));
    let connector_service = ConnectorService::new(
        Arc::new(PgConnectorRepository::new(db.clone())),
        embedder.clone(),
    );
    let retrieval_service = RetrievalService::new(
        Arc::new(PgRetrievalRepository::new(db.clone())),
        embedder,
    );

    let api_routes = catalog_handlers::applications::router(application_service)
        .merge(catalog_handlers::versions::router(version_service))
        .merge(catalog_handlers::connectors::router(connector_service))
        .merge(retrieval_handlers::router(retrieval_service));

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .merge(health_router(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        ))
        .merge(health::readiness_router(db))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Starting Hive API on port {}", config.server.port);
    serve(app, &config.server).await?;

    info!("Hive API shutdown complete");
    Ok(())
}
