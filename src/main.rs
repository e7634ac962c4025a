use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use quick_reply_voice::api::routes::{create_router, AppState};
use quick_reply_voice::config::Config;
use quick_reply_voice::upstream::{LlmClient, TtsClient};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment
    let config = Config::from_env();

    if config.llm.api_key.is_none() {
        tracing::warn!("DEEPSEEK_API_KEY not set; reply suggestions will fail");
    }
    if config.tts.api_key.is_none() {
        tracing::warn!("ELEVENLABS_API_KEY not set; voice synthesis will fail");
    }
    if config.no_credentials() {
        tracing::error!("No provider credentials set, please set at least one key");
        std::process::exit(1);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!("Quick Reply Voice relay v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);

    // Create app state with the two upstream clients
    let state = Arc::new(AppState {
        llm: LlmClient::new(config.llm),
        tts: TtsClient::new(config.tts),
    });

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
