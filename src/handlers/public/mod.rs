use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Todo Items API",
        "version": version,
        "endpoints": {
            "add": "POST /todoitem",
            "list": "GET /todoitem",
            "delete": "DELETE /todoitem/{id}",
            "health": "GET /health",
        }
    }))
}

/// GET /health - store connectivity check
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let store = state.service.store();

    match store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": store.name(),
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed for {} store: {}", store.name(), e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "store": store.name(),
                    "store_error": e.to_string(),
                })),
            )
        }
    }
}
