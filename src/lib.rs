use std::{net::SocketAddr, sync::Arc, time::Duration};

use config::{Cli, Command, RemindArgs, ServeArgs};
use jobs::{reminder::run_reminder_sweep, spawn_all_jobs};
use services::AppState;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod app;
pub mod config;
pub mod constants;
pub mod database;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod push;
pub mod services;
pub mod swagger;
pub mod utils;

/// Install the tracing subscriber.
/// Log lines are written by a background worker, keep the returned guard alive
/// until shutdown so that buffered lines get flushed.
pub fn initialize_logging() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    // create default env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or("suroy_notifier=debug,tower_http=debug".into());

    // initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
    guard
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => start_web_server(args).await,
        Command::Remind(args) => remind(args).await,
    }
}

async fn start_web_server(args: ServeArgs) -> anyhow::Result<()> {
    let state = AppState::connect(&args.common).await?;
    let state = Arc::new(state);
    let reminder_interval = args
        .reminder_interval_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);
    spawn_all_jobs(state.clone(), reminder_interval);
    start_server(state, args.port).await
}

async fn start_server(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    // build the socket address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    // create the app instance
    let app = app::build_app(state);
    tracing::info!("starting server on {addr}");
    // start serving the app in the socket address
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server exited properly");
    Ok(())
}

async fn remind(args: RemindArgs) -> anyhow::Result<()> {
    let state = AppState::connect(&args.common).await?;
    let deadline = Duration::from_secs(args.timeout_secs);
    run_reminder_sweep(&state, deadline).await?;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
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
    tracing::info!("received terminate signal, initiating graceful shutdown");
}
