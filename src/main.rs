//! INGRES AI server
//!
//! Entry point: configuration, logging, then the Axum server.

use std::sync::Arc;

use dotenvy::dotenv;
use ingres_ai::config::AppConfig;
use ingres_ai::server::start_server;
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = AppConfig::load()?;

    // Initialize tracing (M-LOG-STRUCTURED)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))?;
    let registry = tracing_subscriber::registry().with(filter);
    if config.log.format == "json" {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }

    info!(
        name: "config.loaded",
        host = %config.server.host,
        port = config.server.port,
        default_language = %config.chat.default_language,
        timeout_disabled = config.server.timeout_disabled,
        "Configuration loaded"
    );

    start_server(Arc::new(config)).await
}
