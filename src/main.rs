use std::net::SocketAddr;

use time::UtcOffset;

mod app;
mod auth;
mod clock;
mod config;
mod db;
mod error;
mod solutions;
mod solver;
mod state;
mod usage;

#[cfg(test)]
mod testing;

use crate::{config::AppConfig, state::AppState};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Must be resolved while the process is still single-threaded.
    let local_offset = UtcOffset::current_local_offset();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "math_solver=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let local_offset = local_offset.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not determine local UTC offset; using UTC");
        UtcOffset::UTC
    });

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(local_offset))
}

async fn run(local_offset: UtcOffset) -> anyhow::Result<()> {
    let config = AppConfig::from_env(local_offset)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let app_state = AppState::init(config).await?;
    let app = app::build_app(app_state);

    tracing::info!(%local_offset, "listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutting down");
}
