use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colorbook_core::CatalogStore;
use colorbook_server::{create_router, AppState};

use colorbook_server::infra::config::Config;

/// Catalog service for the colorbook site.
#[derive(Debug, Parser)]
#[command(name = "colorbook-server", version)]
struct ServeArgs {
    /// Bind host.
    #[arg(long, env = "COLORBOOK_HOST")]
    host: Option<String>,

    /// Bind port.
    #[arg(long, env = "COLORBOOK_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = dotenvy::dotenv().is_ok();
    let args = ServeArgs::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // Quieter defaults. Override via RUST_LOG.
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let store = CatalogStore::seeded();
    info!(
        pages = store.pages.len(),
        parks = store.parks.len(),
        keywords = store.keywords.len(),
        categories = store.categories.len(),
        "catalog store seeded"
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install ctrl-c handler");
        return;
    }
    info!("shutdown signal received");
}
