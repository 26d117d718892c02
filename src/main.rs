use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use setting_service::auth::{Authenticator, HttpAuthClient};
use setting_service::config::AppConfig;
use setting_service::database::{DatabaseManager, InMemorySettingsStore, PgSettingsStore, SettingsStore};
use setting_service::services::SettingsService;
use setting_service::state::AppState;

#[derive(Parser)]
#[command(name = "setting-service")]
#[command(about = "Tenant-scoped key/value settings service")]
#[command(version)]
struct Args {
    #[arg(long, help = "YAML config file; environment variables still override it")]
    config: Option<PathBuf>,

    #[arg(long, help = "Bind address")]
    host: Option<String>,

    #[arg(long, help = "Bind port")]
    port: Option<u16>,

    #[arg(long, help = "Keep settings in process memory instead of Postgres")]
    memory_store: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_SERVICE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env(),
    };
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    tracing::info!("Starting setting-service in {:?} mode", config.environment);

    let mut manager = None;
    let store: Arc<dyn SettingsStore> = if args.memory_store {
        tracing::warn!("Using in-memory settings store; data is lost on exit");
        Arc::new(InMemorySettingsStore::new())
    } else {
        let db = DatabaseManager::connect_lazy(&config.database)
            .context("failed to configure database pool")?;
        let store = PgSettingsStore::new(
            db.pool(),
            Duration::from_millis(config.database.slow_query_threshold_ms),
        );
        manager = Some(db);
        Arc::new(store)
    };

    let authenticator: Arc<dyn Authenticator> =
        Arc::new(HttpAuthClient::new(&config.auth).context("failed to build auth client")?);

    let service = SettingsService::new(store, config.paging.clone());
    let bind_addr = format!("{}:{}", config.http.host, config.http.port);
    let app = setting_service::app(AppState::new(service, authenticator, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("setting-service listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = manager {
        manager.close().await;
    }
    tracing::info!("setting-service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
