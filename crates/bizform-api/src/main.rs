//! Bizform API server.
//!
//! Reads configuration from flags or the environment, connects to Postgres
//! when `DATABASE_URL` is set (in-memory storage otherwise), and serves the
//! API until Ctrl-C.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bizform_api::db::{self, PgGateway};
use bizform_api::state::{spawn_session_sweeper, LogFormat};
use bizform_api::{AppConfig, AppState, FormStore};
use bizform_state::MemoryGateway;

/// Business formation assistant API.
#[derive(Debug, Parser)]
#[command(name = "bizform-api", version)]
struct Config {
    /// Port to listen on.
    #[arg(long, env = "BIZFORM_PORT", default_value_t = 8080)]
    port: u16,

    /// Postgres connection URL. Saved forms are kept in memory when unset.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Serve `/metrics` and record request metrics.
    #[arg(long, env = "BIZFORM_METRICS_ENABLED", default_value_t = true, action = clap::ArgAction::Set)]
    metrics_enabled: bool,

    /// Log output format.
    #[arg(long, env = "BIZFORM_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Drop form sessions idle for this many seconds.
    #[arg(long, env = "BIZFORM_SESSION_IDLE_SECS", default_value_t = 1800)]
    session_idle_secs: u64,

    /// Maximum live sessions per form.
    #[arg(long, env = "BIZFORM_MAX_SESSIONS", default_value_t = 10_000)]
    max_sessions: usize,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_format);

    let store = match db::init_pool(config.database_url.as_deref())
        .await
        .context("failed to initialize database")?
    {
        Some(pool) => FormStore::Postgres(PgGateway::new(pool)),
        None => FormStore::Memory(MemoryGateway::new()),
    };

    let app_config = AppConfig {
        port: config.port,
        metrics_enabled: config.metrics_enabled,
        session_idle: Duration::from_secs(config.session_idle_secs),
        max_sessions: config.max_sessions,
    };
    let state = AppState::with_config(app_config, store);
    tracing::info!(store = state.store.backend_name(), "application state ready");
    let _sweeper = spawn_session_sweeper(&state);

    let app = bizform_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("bizform-api listening on {addr}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
