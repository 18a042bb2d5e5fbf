//! record-store-server: REST API for the record store

mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{AppConfig, LoggingConfig};
use record_store::domain::TracingEventPublisher;
use record_store::RecordStoreModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "record-store-server", version, about = "Record store REST API")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_addr`
    #[arg(long)]
    bind: Option<String>,

    /// Override `database.url`
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Migrate and serve HTTP (default)
    Serve,
    /// Apply migrations and exit
    Migrate,
    /// Apply migrations and load the demo catalog into an empty database
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = AppConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        cfg.server.bind_addr = bind;
    }
    if let Some(url) = cli.database_url {
        cfg.database.url = url;
    }

    init_tracing(&cfg.logging);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting record-store-server");

    let db = connect(&cfg).await?;
    RecordStoreModule::migrate(&db).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => Ok(()),
        Command::Seed => {
            let seeded = record_store::infra::storage::seed::seed_demo_data(&db).await?;
            info!(seeded, "Seed finished");
            Ok(())
        }
        Command::Serve => serve(cfg, db).await,
    }
}

async fn connect(cfg: &AppConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.database.url.clone());
    options
        .max_connections(cfg.database.max_connections)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(url = %redact(&cfg.database.url), "Connected to database");
    Ok(db)
}

async fn serve(cfg: AppConfig, db: DatabaseConnection) -> Result<()> {
    let module = RecordStoreModule::new(cfg.record_store.clone());
    module
        .init(Arc::new(db), Arc::new(TracingEventPublisher))
        .await?;

    let app = module
        .router()?
        .layer(RequestBodyLimitLayer::new(cfg.server.body_limit));

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Strip credentials from a database URL before logging it
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_credentials() {
        assert_eq!(
            redact("postgres://store:secret@db:5432/records"),
            "postgres://***@db:5432/records"
        );
        assert_eq!(redact("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn test_cli_parses_subcommand_and_overrides() {
        let cli = Cli::parse_from(["record-store-server", "--bind", "0.0.0.0:1", "migrate"]);
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:1"));
        assert!(matches!(cli.command, Some(Command::Migrate)));
    }
}
