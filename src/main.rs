use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;

/// Italian net salary calculator served over HTTP.
///
/// Loads a tax-year rule set from a configuration directory and exposes
/// `/calculate`, `/sweep` and `/surtax`.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Directory holding `rules.yaml` and `regions.yaml`.
    #[arg(long, default_value = "config/it2026")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

/// Initialise the tracing subscriber.
///
/// Honours `RUST_LOG` when set and falls back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading tax rules from {}", cli.config.display()))?;
    info!(
        tax_year = config.rules().metadata().tax_year,
        rules = %config.rules().metadata().name,
        "Loaded tax rules"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;

    info!(address = %cli.bind, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
