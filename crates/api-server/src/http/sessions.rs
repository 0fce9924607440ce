use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shared::catalog::resolve_model;
use shared::chat::SharedSession;
use shared::models::{
    CreateSessionRequest, OkResponse, SessionView, UpdateSessionSettingsRequest,
};
use tracing::debug;
use uuid::Uuid;

use super::AppState;
use super::errors::{catalog_error_response, session_store_error_response};

pub(super) async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    if let Some(model) = req.model.as_deref()
        && let Err(err) = resolve_model(req.variant, model)
    {
        return catalog_error_response(err);
    }

    let now = Utc::now();
    let purged = state.sessions.purge_idle(now);
    if purged > 0 {
        debug!(purged, "dropped idle sessions before creating a new one");
    }

    let session = match req.session_id {
        Some(session_id) => match state.sessions.get_or_init(session_id, req.variant, now) {
            Ok(session) => session,
            Err(err) => return session_store_error_response(err),
        },
        None => state.sessions.create(req.variant, now),
    };

    let mut session = session.lock().await;
    if let Some(model) = req.model.as_deref()
        && let Err(err) = session.select_model(model)
    {
        return catalog_error_response(err);
    }
    if let Some(api_key) = req.api_key.as_deref() {
        session.set_api_key(api_key);
    }

    (
        StatusCode::CREATED,
        Json(SessionView::from_session(&session, state.fallback_api_key())),
    )
        .into_response()
}

/// A read counts as activity, so a polling client keeps its session alive.
pub(super) async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    let session = match load_session(&state, session_id) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let mut session = session.lock().await;
    session.touch(Utc::now());
    (
        StatusCode::OK,
        Json(SessionView::from_session(&session, state.fallback_api_key())),
    )
        .into_response()
}

pub(super) async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    match state.sessions.remove(session_id) {
        Ok(()) => (StatusCode::OK, Json(OkResponse { ok: true })).into_response(),
        Err(err) => session_store_error_response(err),
    }
}

pub(super) async fn update_settings(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<UpdateSessionSettingsRequest>,
) -> Response {
    let session = match load_session(&state, session_id) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let mut session = session.lock().await;
    if let Some(model) = req.model.as_deref() {
        match session.select_model(model) {
            Ok(option) => debug!(
                session_id = %session_id,
                model = option.provider_model,
                "session model changed"
            ),
            Err(err) => return catalog_error_response(err),
        }
    }
    if let Some(api_key) = req.api_key.as_deref() {
        session.set_api_key(api_key);
    }
    session.touch(Utc::now());

    (
        StatusCode::OK,
        Json(SessionView::from_session(&session, state.fallback_api_key())),
    )
        .into_response()
}

pub(super) fn load_session(state: &AppState, session_id: Uuid) -> Result<SharedSession, Response> {
    state
        .sessions
        .get(session_id)
        .map_err(session_store_error_response)
}
