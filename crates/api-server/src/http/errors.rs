use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::catalog::CatalogError;
use shared::chat::{ChatClientError, SessionStoreError, TurnError};
use shared::loaders::LoaderError;
use shared::models::{ErrorBody, ErrorResponse};
use tracing::{error, warn};

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        }),
    )
        .into_response()
}

pub(super) fn bad_request_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, code, message)
}

pub(super) fn bad_gateway_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::BAD_GATEWAY, code, message)
}

pub(super) fn payload_too_large_response(max_upload_bytes: usize) -> Response {
    error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        "upload_too_large",
        &format!("Uploads are limited to {max_upload_bytes} bytes"),
    )
}

pub(super) fn internal_error_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "Unexpected server error",
    )
}

pub(super) fn session_store_error_response(err: SessionStoreError) -> Response {
    match err {
        SessionStoreError::NotFound(_) => error_response(
            StatusCode::NOT_FOUND,
            "session_not_found",
            "Session does not exist or has ended",
        ),
        SessionStoreError::VariantMismatch { .. } => {
            error_response(StatusCode::CONFLICT, "session_variant_mismatch", &err.to_string())
        }
    }
}

pub(super) fn catalog_error_response(err: CatalogError) -> Response {
    bad_request_response("unknown_model", &err.to_string())
}

/// Artifact problems are shown inline; the session simply stays without
/// context.
pub(super) fn loader_error_response(err: LoaderError) -> Response {
    warn!(error = %err, "artifact could not be loaded");
    let code = match err {
        LoaderError::InvalidPdf(_) | LoaderError::PageExtraction { .. } => "document_unreadable",
        LoaderError::InvalidArtifact { .. }
        | LoaderError::UnsupportedSchemaVersion { .. }
        | LoaderError::FeatureCountMismatch { .. } => "model_artifact_unreadable",
    };
    error_response(StatusCode::UNPROCESSABLE_ENTITY, code, &err.to_string())
}

pub(super) fn turn_error_response(err: TurnError) -> Response {
    match err {
        TurnError::EmptyPrompt => bad_request_response("empty_prompt", "Message content is empty"),
        TurnError::MissingApiKey => error_response(
            StatusCode::CONFLICT,
            "api_key_missing",
            "Enter your OpenRouter API key to start.",
        ),
        TurnError::MissingContext => error_response(
            StatusCode::CONFLICT,
            "context_missing",
            "Load a document or model before chatting.",
        ),
        TurnError::Gateway(err) => chat_client_error_response(err),
    }
}

fn chat_client_error_response(err: ChatClientError) -> Response {
    error!(error = %err, "chat provider call failed");
    match err {
        ChatClientError::Timeout => bad_gateway_response(
            "chat_provider_timeout",
            "The chat provider did not answer in time",
        ),
        ChatClientError::Transport(_) => bad_gateway_response(
            "chat_provider_unavailable",
            "The chat provider could not be reached",
        ),
        ChatClientError::InvalidPayload(_) => bad_gateway_response(
            "chat_provider_invalid_payload",
            "The chat provider returned an unexpected response",
        ),
    }
}
