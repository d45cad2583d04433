use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and enabled collaborators.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model = state
        .roadmaps
        .has_model()
        .then(|| state.config.llm_model.clone());

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "ai_model": model,
        "persistence": state.answer_store.is_some()
    }))
}
