use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use chrono::Utc;
use shared::chat::AssistantVariant;
use shared::loaders::{extract_text, load_model_summary_from_values};
use shared::models::{LoadModelArtifactsRequest, SessionView, UploadDocumentRequest};
use tracing::{error, info};
use uuid::Uuid;

use super::AppState;
use super::errors::{
    bad_request_response, internal_error_response, loader_error_response,
    payload_too_large_response,
};
use super::sessions::load_session;

pub(super) async fn upload_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<UploadDocumentRequest>,
) -> Response {
    let session = match load_session(&state, session_id) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let pdf_bytes = match base64::engine::general_purpose::STANDARD.decode(req.pdf_base64.trim()) {
        Ok(pdf_bytes) => pdf_bytes,
        Err(_) => {
            return bad_request_response("invalid_base64", "pdf_base64 is not valid base64");
        }
    };
    if pdf_bytes.len() > state.max_upload_bytes {
        return payload_too_large_response(state.max_upload_bytes);
    }

    let mut session = session.lock().await;
    if session.variant() != AssistantVariant::PaperAnalyst {
        return wrong_variant_response(AssistantVariant::PaperAnalyst);
    }

    let byte_count = pdf_bytes.len();
    let extracted = match tokio::task::spawn_blocking(move || extract_text(&pdf_bytes)).await {
        Ok(extracted) => extracted,
        Err(err) => {
            error!(session_id = %session_id, error = %err, "pdf extraction task failed");
            return internal_error_response();
        }
    };
    let text = match extracted {
        Ok(text) => text,
        Err(err) => return loader_error_response(err),
    };

    let seeded = session.load_summary(Some(text));
    session.touch(Utc::now());
    info!(session_id = %session_id, byte_count, seeded, "pdf loaded");

    (
        StatusCode::OK,
        Json(SessionView::from_session(&session, state.fallback_api_key())),
    )
        .into_response()
}

pub(super) async fn load_model_artifacts(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<LoadModelArtifactsRequest>,
) -> Response {
    let session = match load_session(&state, session_id) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let mut session = session.lock().await;
    if session.variant() != AssistantVariant::ModelExplainer {
        return wrong_variant_response(AssistantVariant::ModelExplainer);
    }

    let summary = match load_model_summary_from_values(req.model, req.scaler) {
        Ok(summary) => summary,
        Err(err) => return loader_error_response(err),
    };

    let seeded = session.load_summary(Some(summary.describe()));
    session.touch(Utc::now());
    info!(
        session_id = %session_id,
        model_type = %summary.model_type,
        scaler = %summary.scaler_name,
        seeded,
        "model artifacts loaded"
    );

    (
        StatusCode::OK,
        Json(SessionView::from_session(&session, state.fallback_api_key())),
    )
        .into_response()
}

fn wrong_variant_response(expected: AssistantVariant) -> Response {
    bad_request_response(
        "wrong_session_variant",
        &format!("This upload is only accepted by {} sessions", expected.as_str()),
    )
}
