use std::sync::Arc;

use anyhow::Context;
use mock_jwt::config::{LogFormat, ServerConfig};
use mock_jwt::http::{self, AppState};
use mock_jwt::keys::KeyStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(config: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting mock JWT server");

    let state = Arc::new(AppState::new(Arc::new(KeyStore::new())));
    let app = http::create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Mock JWT server listening on {}", addr);
    for line in http::USAGE.lines() {
        info!("{}", line);
    }

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
