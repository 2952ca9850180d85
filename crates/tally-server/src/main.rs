//! tally server
//!
//! - Config: optional `tally.yaml` + `DATABASE_URL` / `PORT`
//! - Store connect and schema upsert before serving (fatal on failure)
//! - Startup health probe seeds the `database_health` gauge
//! - Graceful shutdown on Ctrl+C / SIGTERM

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use tally_core::error::{Result, TallyError};
use tally_server::{app_state::AppState, config, obs::Metrics, router, store};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "tally-server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;

    let store = store::connect(&cfg.store).await?;
    let metrics = Arc::new(Metrics::new());
    let state = AppState::new(&cfg, Arc::clone(&store), metrics)?;

    store.ensure_schema(state.registry()).await?;
    let status = state.health().check().await;
    tracing::info!(backend = store.backend(), status = status.as_str(), "store ready");

    let app = router::build_router(state);

    let listen = cfg.listen_addr();
    tracing::info!(%listen, "tally-server starting");
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| TallyError::Config(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TallyError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}
