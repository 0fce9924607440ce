use std::sync::Arc;

use api_server::http::{AppState, build_router};
use shared::chat::{OpenRouterChatClient, OpenRouterChatConfig, SessionStore};

pub const TEST_SERVER_API_KEY: &str = "sk-or-server-key";
const TEST_MAX_UPLOAD_BYTES: usize = 1024 * 1024;
const TEST_SESSION_IDLE_TTL_SECONDS: u64 = 3600;

pub fn build_test_router(
    chat_completions_url: &str,
    fallback_api_key: Option<&str>,
) -> axum::Router {
    build_test_router_with_idle_ttl(
        chat_completions_url,
        fallback_api_key,
        TEST_SESSION_IDLE_TTL_SECONDS,
    )
}

pub fn build_test_router_with_idle_ttl(
    chat_completions_url: &str,
    fallback_api_key: Option<&str>,
    idle_ttl_seconds: u64,
) -> axum::Router {
    let chat_client = OpenRouterChatClient::new(OpenRouterChatConfig {
        chat_completions_url: chat_completions_url.to_string(),
        http_referer: "https://integration.test".to_string(),
        app_title: "integration-tests".to_string(),
        timeout_ms: Some(5_000),
    })
    .expect("chat client should build");

    build_router(AppState {
        sessions: SessionStore::new(idle_ttl_seconds),
        chat_gateway: Arc::new(chat_client),
        openrouter_api_key: fallback_api_key.map(ToString::to_string),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
    })
}
