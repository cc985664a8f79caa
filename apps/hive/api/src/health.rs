//! Readiness probe backed by the database pool.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use database::postgres::{check_health_detailed, DatabaseConnection};
use serde_json::json;

/// Builds a router exposing `/ready`.
///
/// Unlike `/health`, this probes the database so orchestrators stop
/// routing traffic when the pool is broken.
pub fn readiness_router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(readiness)).with_state(db)
}

async fn readiness(State(db): State<DatabaseConnection>) -> Response {
    let status = check_health_detailed(&db).await;
    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if status.healthy { "ready" } else { "unavailable" },
        "message": status.message,
        "responseTimeMs": status.response_time_ms,
    });

    (code, Json(body)).into_response()
}
