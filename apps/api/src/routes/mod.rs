pub mod health;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::religion::handlers;
use crate::state::AppState;

/// GET /
/// Service name, version and endpoint index.
async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "Procedural Religion Generator API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate_religion": "POST /religions/generate",
            "get_religion": "GET /religions/{religion_id}",
            "list_religions": "GET /religions",
            "religion_summary": "GET /religions/{religion_id}/summary",
            "delete_religion": "DELETE /religions/{religion_id}",
            "generate_component": "POST /components/generate",
            "generate_variations": "POST /religions/variations",
            "expand_religion": "POST /religions/{religion_id}/expand?component_type=deity|ritual|legend"
        }
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health::health_handler))
        .route("/religions", get(handlers::handle_list_religions))
        .route(
            "/religions/generate",
            post(handlers::handle_generate_religion),
        )
        .route(
            "/religions/variations",
            post(handlers::handle_generate_variations),
        )
        .route(
            "/religions/:id",
            get(handlers::handle_get_religion).delete(handlers::handle_delete_religion),
        )
        .route(
            "/religions/:id/summary",
            get(handlers::handle_religion_summary),
        )
        .route(
            "/religions/:id/expand",
            post(handlers::handle_expand_religion),
        )
        .route(
            "/components/generate",
            post(handlers::handle_generate_component),
        )
        .with_state(state)
}
