mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{AppConfig, CliOverrides, DatabaseConfig};
use feedback_settings::FeedbackSettingsModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::PathBuf;

/// Feedback Settings Server - contact channel preferences for feedback requests
#[derive(Parser)]
#[command(name = "feedback-settings-server")]
#[command(about = "Feedback Settings Server - contact channel preferences for feedback requests")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use mock database (sqlite::memory:)
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML (if provided) -> 3) env (FEEDBACK_SETTINGS__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        mock: cli.mock,
    });

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    logging::init(&config.logging, cli.verbose);
    tracing::info!("Feedback Settings Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn connect(database: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database.url.clone());
    options
        .max_connections(database.max_connections)
        .sqlx_logging(false);

    // Every connection opens its own in-memory database, which lives only
    // as long as that connection
    if database.is_in_memory() {
        tracing::info!("Mock mode enabled: using in-memory SQLite");
        options.min_connections(1).max_connections(1);
    }

    Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to database '{}'", database.url))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let db = connect(&config.database).await?;
    let module = FeedbackSettingsModule::init(config.feedback_settings.clone(), db).await?;
    let router = module.router();

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Feedback Settings Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
