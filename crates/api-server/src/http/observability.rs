use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
const MAX_REQUEST_ID_LEN: usize = 128;
const SESSION_PATH_PREFIX: &str = "/v1/sessions/";

/// Runs each request inside an `http_request` span so handler logs carry the
/// request id and, for session routes, the session id. Bodies are never
/// logged: they carry documents and chat text.
pub(super) async fn request_observability_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(accepted_request_id)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_string(), |m| m.as_str().to_string());
    let session_id = session_id_from_path(req.uri().path())
        .map(|id| id.to_string())
        .unwrap_or_default();

    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
        session_id = %session_id,
    );
    let started_at = Instant::now();

    let mut response = next.run(req).instrument(span.clone()).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let latency_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
    let _entered = span.enter();
    log_outcome(response.status(), latency_ms);

    response
}

fn log_outcome(status: StatusCode, latency_ms: u64) {
    let status_code = status.as_u16();
    if status == StatusCode::BAD_GATEWAY {
        warn!(status = status_code, latency_ms, "chat provider unavailable");
    } else if status.is_server_error() {
        warn!(status = status_code, latency_ms, "request failed");
    } else {
        info!(status = status_code, latency_ms, "request completed");
    }
}

fn accepted_request_id(raw: &str) -> Option<String> {
    let candidate = raw.trim();
    let well_formed = !candidate.is_empty()
        && candidate.len() <= MAX_REQUEST_ID_LEN
        && candidate
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.'));

    well_formed.then(|| candidate.to_string())
}

fn session_id_from_path(path: &str) -> Option<Uuid> {
    let rest = path.strip_prefix(SESSION_PATH_PREFIX)?;
    let segment = rest.split('/').next()?;
    Uuid::parse_str(segment).ok()
}
