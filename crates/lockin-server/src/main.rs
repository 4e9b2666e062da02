//! lockin server binary.
//!
//! Reads `lockin.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the tracker API over HTTP.
//!
//! ```text
//! lockin-server init-db            # create the database and exit
//! lockin-server                    # serve (same as `lockin-server serve`)
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lockin_api::AppState;
use lockin_coach::CoachClient;
use lockin_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "lockin accountability tracker server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lockin.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
  /// Serve the HTTP API (default).
  Serve,
  /// Create the database file and tables, then exit.
  InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::InitDb => init_db(&cfg).await,
    Command::Serve => serve(cfg).await,
  }
}

async fn open_store(cfg: &ServerConfig) -> anyhow::Result<SqliteStore> {
  SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))
}

async fn init_db(cfg: &ServerConfig) -> anyhow::Result<()> {
  tracing::info!(path = %cfg.store_path.display(), "initialising database");
  open_store(cfg).await?;
  tracing::info!("database initialised");
  Ok(())
}

async fn serve(cfg: ServerConfig) -> anyhow::Result<()> {
  let store = open_store(&cfg).await?;
  if let Some(path) = store.path() {
    tracing::info!(path = %path.display(), "store opened");
  }
  let coach = CoachClient::new(cfg.coach.clone())
    .context("failed to build coaching client")?;

  let state = AppState {
    store: Arc::new(store),
    coach: Arc::new(coach),
  };
  let app = lockin_api::api_router(state);
  let address = cfg.address();

  tracing::info!(coach = %cfg.coach.url, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
