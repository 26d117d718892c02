use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::api::Envelope;
use crate::state::AppState;

/// GET /health - unauthenticated store probe
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.service.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let mut envelope = Envelope::failure(Value::Null, &e);
            envelope.status_code = StatusCode::SERVICE_UNAVAILABLE;
            envelope.into_response()
        }
    }
}
