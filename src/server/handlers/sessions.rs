use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::errors::ApiError;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectDomainRequest {
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = state.sessions.create()?;
    tracing::info!(session = %session_id, "session created");
    Ok(Json(json!({ "session_id": session_id })))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sessions.get(&session_id)?;
    let session = session.lock().await;
    Ok(Json(session_view(&session)))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.sessions.remove(&session_id)?;
    Ok(Json(json!({ "deleted": session_id })))
}

/// Activate a domain for the session. The knowledge base is loaded,
/// chunked and indexed before this returns; the client shows a loading
/// indicator for the duration.
pub async fn select_domain(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(payload): Json<SelectDomainRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    session.select_domain(&state, &payload.slug).await?;
    Ok(Json(session_view(&session)))
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(payload): Json<AskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    let outcome = session.ask(&state, &payload.question).await?;
    Ok(Json(json!({
        "answer": outcome.answer,
        "sources": outcome.sources,
        "follow_ups": outcome.follow_ups,
    })))
}

pub async fn back(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    session.back();
    Ok(Json(session_view(&session)))
}

fn session_view(session: &Session) -> Value {
    match session.active() {
        Some(active) => json!({
            "session_id": &session.id,
            "created_at": session.created_at.to_rfc3339(),
            "state": "domain_active",
            "domain": {
                "slug": active.spec.slug,
                "title": active.spec.title,
                "icon": active.spec.icon,
                "description": active.spec.description,
                "suggested_questions": active.spec.suggested_questions,
            },
            "messages": &active.transcript,
            "follow_ups": &active.follow_ups,
        }),
        None => json!({
            "session_id": &session.id,
            "created_at": session.created_at.to_rfc3339(),
            "state": "landing",
            "domain": Value::Null,
            "messages": [],
            "follow_ups": [],
        }),
    }
}
