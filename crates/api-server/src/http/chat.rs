use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shared::models::{SendMessageRequest, SendMessageResponse, SessionView};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use super::errors::turn_error_response;
use super::sessions::load_session;

/// One chat submission. The session stays locked for the whole cycle, so a
/// second submission for the same session waits for this one to finish.
pub(super) async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let session = match load_session(&state, session_id) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let mut session = session.lock().await;
    let reply = match session
        .submit_user_turn(
            state.chat_gateway.as_ref(),
            state.fallback_api_key(),
            &req.content,
            Utc::now(),
        )
        .await
    {
        Ok(reply) => reply,
        Err(err) => return turn_error_response(err),
    };

    info!(
        session_id = %session_id,
        model = session.model().provider_model,
        history_len = session.conversation().len(),
        "chat turn completed"
    );

    (
        StatusCode::OK,
        Json(SendMessageResponse {
            reply,
            session: SessionView::from_session(&session, state.fallback_api_key()),
        }),
    )
        .into_response()
}
