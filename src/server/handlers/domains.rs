use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// Landing page payload: the six selectable domains with their icons,
/// descriptions and static suggested questions.
pub async fn list_domains(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let domains: Vec<Value> = state
        .catalog
        .all()
        .iter()
        .map(|d| {
            json!({
                "slug": d.slug,
                "title": d.title,
                "icon": d.icon,
                "description": d.description,
                "suggested_questions": d.suggested_questions,
            })
        })
        .collect();

    Json(json!({ "domains": domains }))
}
