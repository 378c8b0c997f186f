pub mod api;
pub mod cache;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub use config::Config;

use db::Store;
use state::SharedState;

pub async fn run(cli: cli::Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let missing = config.missing_api_keys();
    if !missing.is_empty() {
        warn!(
            "No API key configured for: {}. Those categories will fail at request time.",
            missing.join(", ")
        );
    }

    match cli.command {
        cli::Command::Serve => run_server(config).await,
        cli::Command::Check => run_check(config).await,
        cli::Command::Lookup { query } => cmd_lookup(config, &query.join(" ")).await,
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Cityscout v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let port = config.server.port;
    let state = api::create_app_state_from_config(config).await?;
    let app = api::router(state).await;

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("API server running at http://0.0.0.0:{}", port);
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    info!("Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

async fn run_check(config: Config) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    store.ping().await?;

    println!("Configuration OK, store reachable.");
    Ok(())
}

async fn cmd_lookup(config: Config, query: &str) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("Usage: cityscout lookup <place name>");
    }

    let shared = Arc::new(SharedState::new(config).await?);
    let location = shared.locations.resolve(query.trim()).await?;

    println!("{}", serde_json::to_string_pretty(&location)?);
    Ok(())
}
