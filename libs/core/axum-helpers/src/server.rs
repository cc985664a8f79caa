use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use core_config::server::ServerConfig;
use serde::Serialize;
use tokio::signal;
use tracing::info;
use utoipa::ToSchema;

/// Liveness response returned by the `/health` endpoint.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

async fn health_handler(service: String, version: String) -> Response {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service,
        version,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Builds a router exposing the `/health` liveness endpoint.
///
/// The endpoint returns 200 whenever the process is running; readiness
/// checks that probe dependencies belong in the application router.
pub fn health_router(service: &str, version: &str) -> Router {
    let service = service.to_string();
    let version = version.to_string();

    Router::new().route(
        "/health",
        get(move || health_handler(service.clone(), version.clone())),
    )
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM.
///
/// Intended for use with `axum::serve().with_graceful_shutdown()`.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}

/// Binds the configured address and runs the router until a shutdown
/// signal arrives.
///
/// # Errors
/// Returns an error if the TCP listener fails to bind or the server
/// fails while running.
pub async fn serve(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint_returns_ok() {
        let router = health_router("hive-api", "0.1.0");
        let request = axum::http::Request::builder()
            .uri("/health")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "hive-api");
    }
}
