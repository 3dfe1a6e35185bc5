//! Axum route handlers for the Religion API.

use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::religion::models::{
    default_language, ComponentKind, DeityType, GenerationParameters, Religion,
};
use crate::religion::store::StoredReligion;
use crate::state::AppState;

/// Upper bound on variations per request.
pub const MAX_VARIATIONS: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ComponentRequest {
    pub component_type: String,
    #[serde(default)]
    pub context: String,
    pub religion_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComponentResponse {
    pub component: Map<String, Value>,
    pub component_type: ComponentKind,
}

#[derive(Debug, Deserialize)]
pub struct VariationRequest {
    pub base_theme: String,
    #[serde(default = "default_variation_count")]
    pub count: usize,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_variation_count() -> usize {
    3
}

#[derive(Debug, Serialize)]
pub struct Variation {
    pub id: String,
    pub religion: Religion,
}

#[derive(Debug, Serialize)]
pub struct VariationResponse {
    pub base_theme: String,
    pub variations: Vec<Variation>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ReligionListItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub deity_type: DeityType,
    pub created_at: DateTime<Utc>,
    pub generation_time: f64,
}

#[derive(Debug, Serialize)]
pub struct ReligionListResponse {
    pub religions: Vec<ReligionListItem>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ReligionSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub deity_type: DeityType,
    pub deity_count: usize,
    pub ritual_count: usize,
    pub legend_count: usize,
    pub moral_rule_count: usize,
    pub symbol_count: usize,
    pub core_beliefs: Vec<String>,
    pub holy_places: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpandQuery {
    pub component_type: String,
}

#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub message: String,
    pub religion_id: String,
    pub added_component: ComponentKind,
    pub religion: Religion,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_religion: String,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Religion {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /religions/generate
pub async fn handle_generate_religion(
    State(state): State<AppState>,
    Json(params): Json<GenerationParameters>,
) -> Result<Json<StoredReligion>, AppError> {
    let created_at = Utc::now();
    let started = Instant::now();
    info!("New religion generation request: {params:?}");

    let religion = state.generator.generate_religion(&params).await?;
    let stored = state
        .store
        .insert_generated(religion, created_at, started.elapsed().as_secs_f64())
        .await;

    info!("Religion generated: {}", stored.id);
    Ok(Json(stored))
}

/// GET /religions/:id
pub async fn handle_get_religion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredReligion>, AppError> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// GET /religions
pub async fn handle_list_religions(State(state): State<AppState>) -> Json<ReligionListResponse> {
    let religions: Vec<_> = state
        .store
        .list()
        .await
        .into_iter()
        .map(|stored| ReligionListItem {
            id: stored.id,
            name: stored.religion.name,
            description: stored.religion.description,
            deity_type: stored.religion.deity_type,
            created_at: stored.created_at,
            generation_time: stored.generation_time,
        })
        .collect();

    Json(ReligionListResponse {
        total_count: religions.len(),
        religions,
    })
}

/// POST /components/generate
///
/// An unknown `religion_id` is ignored and the component is generated without
/// religion context.
pub async fn handle_generate_component(
    State(state): State<AppState>,
    Json(request): Json<ComponentRequest>,
) -> Result<Json<ComponentResponse>, AppError> {
    let kind: ComponentKind = request.component_type.parse()?;

    let existing = match &request.religion_id {
        Some(id) => state.store.get(id).await.map(|stored| stored.religion),
        None => None,
    };

    let component = state
        .generator
        .generate_component(kind, &request.context, existing.as_ref())
        .await?;

    Ok(Json(ComponentResponse {
        component,
        component_type: kind,
    }))
}

/// POST /religions/variations
///
/// Returns 400 when `base_theme` is blank or `count` exceeds
/// [`MAX_VARIATIONS`]. Variations that fail to generate are skipped.
pub async fn handle_generate_variations(
    State(state): State<AppState>,
    Json(request): Json<VariationRequest>,
) -> Result<Json<VariationResponse>, AppError> {
    if request.base_theme.trim().is_empty() {
        return Err(AppError::Validation("base_theme cannot be empty".to_string()));
    }
    if request.count > MAX_VARIATIONS {
        return Err(AppError::Validation(format!(
            "count must be at most {MAX_VARIATIONS}"
        )));
    }

    let religions = state
        .generator
        .generate_variations(&request.base_theme, request.count, &request.language)
        .await;

    let mut variations = Vec::with_capacity(religions.len());
    for (index, religion) in religions.into_iter().enumerate() {
        let stored = state
            .store
            .insert_variation(&request.base_theme, index + 1, religion)
            .await;
        variations.push(Variation {
            id: stored.id,
            religion: stored.religion,
        });
    }

    Ok(Json(VariationResponse {
        base_theme: request.base_theme,
        count: variations.len(),
        variations,
    }))
}

/// POST /religions/:id/expand?component_type=deity
pub async fn handle_expand_religion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExpandQuery>,
) -> Result<Json<ExpandResponse>, AppError> {
    let stored = state.store.get(&id).await.ok_or_else(|| not_found(&id))?;

    let component = state
        .generator
        .expand_religion(&stored.religion, &query.component_type)
        .await?;
    let added_component = component.kind();

    // The record may have been deleted while the backend call was in flight.
    let religion = state
        .store
        .append_component(&id, component)
        .await
        .ok_or_else(|| not_found(&id))?;

    info!("Religion {id} expanded with a new {added_component}");
    Ok(Json(ExpandResponse {
        message: "Religion expanded successfully".to_string(),
        religion_id: id,
        added_component,
        religion,
    }))
}

/// GET /religions/:id/summary
pub async fn handle_religion_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReligionSummary>, AppError> {
    let stored = state.store.get(&id).await.ok_or_else(|| not_found(&id))?;
    let religion = stored.religion;

    Ok(Json(ReligionSummary {
        id: stored.id,
        deity_count: religion.deities.len(),
        ritual_count: religion.rituals.len(),
        legend_count: religion.legends.len(),
        moral_rule_count: religion.moral_rules.len(),
        symbol_count: religion.symbols.len(),
        name: religion.name,
        description: religion.description,
        deity_type: religion.deity_type,
        core_beliefs: religion.core_beliefs,
        holy_places: religion.holy_places,
    }))
}

/// DELETE /religions/:id
pub async fn handle_delete_religion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = state.store.remove(&id).await.ok_or_else(|| not_found(&id))?;
    info!("Religion deleted: {id}");

    Ok(Json(DeleteResponse {
        message: "Religion deleted successfully".to_string(),
        deleted_religion: removed.religion.name,
    }))
}
