use axum::Json;

use crate::api::types::HealthStatus;

/// Liveness only; never touches the store.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
