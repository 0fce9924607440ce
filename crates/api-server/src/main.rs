use std::net::SocketAddr;
use std::sync::Arc;

use api_server::http::{AppState, build_router};
use shared::chat::{OpenRouterChatClient, SessionStore};
use shared::config::{ApiConfig, load_dotenv};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(err) = load_dotenv() {
        eprintln!("{err}");
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api_server=debug,shared=info,axum=info".to_string()),
        )
        .init();

    let config = match ApiConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read config: {err}");
            std::process::exit(1);
        }
    };

    if config.openrouter_api_key.is_none() {
        warn!("OPENROUTER_API_KEY is not set; each session must supply its own key");
    }

    let chat_client = match OpenRouterChatClient::new(config.openrouter.clone()) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "failed to initialize chat client");
            std::process::exit(1);
        }
    };

    let app = build_router(AppState {
        sessions: SessionStore::new(config.session_idle_ttl_seconds),
        chat_gateway: Arc::new(chat_client),
        openrouter_api_key: config.openrouter_api_key.clone(),
        max_upload_bytes: config.max_upload_bytes,
    });

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!(bind_addr = %config.bind_addr, error = %err, "invalid bind address");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, error = %err, "failed to bind listener");
            std::process::exit(1);
        }
    };

    info!(
        chat_completions_url = %config.openrouter.chat_completions_url,
        "api server listening on {}",
        listener.local_addr().unwrap_or(addr)
    );

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %err, "server stopped with an error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received; in-memory sessions are discarded");
}
