use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gpt_backend::{api::create_router, application::builder::ApplicationBuilder, Config};

/// Backend for GPT Actions: ZIP bundles and per-user memory
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Address to listen on (overrides LISTEN_ADDR)
    #[arg(long)]
    listen_addr: Option<String>,

    /// Public origin for download links (overrides BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for stored archives (overrides LOCAL_STORAGE_PATH)
    #[arg(long)]
    storage_path: Option<PathBuf>,

    /// Emit JSON logs (same as LOG_FORMAT=json)
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let json_logs = cli.json_logs
        || std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
    init_tracing(json_logs);

    info!("Starting gpt-backend {}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env();
    if let Some(listen_addr) = cli.listen_addr {
        config.listen_addr = listen_addr;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(storage_path) = cli.storage_path {
        config.local_storage_path = storage_path;
    }
    config.validate().map_err(anyhow::Error::msg)?;
    info!("Configuration loaded and validated");

    let listen_addr = config.listen_addr.clone();
    let state = ApplicationBuilder::new(config)
        .with_database()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("database setup failed")?
        .with_infrastructure()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("infrastructure setup failed")?
        .build()
        .map_err(|e| anyhow::anyhow!(e))?;

    let app = create_router(state);

    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", listen_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
