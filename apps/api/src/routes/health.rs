use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status and the number of stored religions.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "generated_religions_count": state.store.len().await
    }))
}
