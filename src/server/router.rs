use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::handlers::{domains, health, sessions};
use crate::state::AppState;

/// All routes of the chat widget surface: the landing page domain list
/// and the per-session actions (select domain, ask, back).
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/domains", get(domains::list_domains))
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/:session_id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route(
            "/api/sessions/:session_id/domain",
            post(sessions::select_domain),
        )
        .route("/api/sessions/:session_id/ask", post(sessions::ask))
        .route("/api/sessions/:session_id/back", post(sessions::back))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
