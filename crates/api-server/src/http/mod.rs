use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{Router, middleware};
use shared::chat::{ChatGateway, SessionStore};

mod artifacts;
mod catalog;
mod chat;
mod errors;
mod health;
mod observability;
mod sessions;

/// Room for base64 inflation and the JSON envelope around an upload.
const UPLOAD_ENVELOPE_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub chat_gateway: Arc<dyn ChatGateway>,
    /// Used when a session has not supplied its own key.
    pub openrouter_api_key: Option<String>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub(crate) fn fallback_api_key(&self) -> Option<&str> {
        self.openrouter_api_key.as_deref()
    }
}

pub fn build_router(app_state: AppState) -> Router {
    let body_limit = app_state
        .max_upload_bytes
        .saturating_mul(4)
        .div_ceil(3)
        .saturating_add(UPLOAD_ENVELOPE_OVERHEAD_BYTES);

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/v1/models", get(catalog::list_models))
        .route("/v1/sessions", post(sessions::create_session))
        .route(
            "/v1/sessions/{session_id}",
            get(sessions::get_session).delete(sessions::end_session),
        )
        .route(
            "/v1/sessions/{session_id}/settings",
            put(sessions::update_settings),
        )
        .route(
            "/v1/sessions/{session_id}/document",
            post(artifacts::upload_document),
        )
        .route(
            "/v1/sessions/{session_id}/model-artifacts",
            post(artifacts::load_model_artifacts),
        )
        .route(
            "/v1/sessions/{session_id}/messages",
            post(chat::send_message),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(
            observability::request_observability_middleware,
        ))
        .with_state(app_state)
}
