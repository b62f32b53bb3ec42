use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service version plus embedding model status. Does not trigger a model
/// load; reports what the last probe found.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model = state.scorer.model();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resumerev-api",
        "model": {
            "configured": state.config.embedding_url.is_some(),
            "healthy": model.is_healthy(),
            "backend": model.backend_name(),
        }
    }))
}
