pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::DashboardResult;

pub use router::create_router;
pub use state::AppState;

/// Bind, serve until Ctrl-C, then stop the cache sweeper
pub async fn serve(config: &Config, state: AppState) -> DashboardResult<()> {
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "dashboard API listening");

    let sweeper = spawn_sweeper(state.clone(), config.sweep_interval);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("dashboard API stopped");
    Ok(())
}

/// Periodically drop stale cache entries so memory tracks the active key set
pub fn spawn_sweeper(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = state.sweep_caches();
            debug!(removed, "cache sweep");
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
