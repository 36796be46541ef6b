//! HTTP server startup.
//!
//! Opens the database, builds the shared [`AppState`], and serves the
//! [`api::router`] until ctrl-c.

use crate::api::{self, AppState};
use crate::config::StrideConfig;
use crate::db;
use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};

/// Open the database and build the handler state.
pub fn setup_state(config: StrideConfig) -> Result<AppState> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let state = AppState::new(Arc::new(Mutex::new(conn)), config);
    tracing::info!(
        record_key = %state.record_key(),
        utc_offset_minutes = state.day_boundary.offset_minutes(),
        "streak policy ready"
    );
    Ok(state)
}

/// Start the HTTP server and block until shutdown.
pub async fn serve(config: StrideConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "starting Stride server");

    let state = setup_state(config)?;
    let router = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "listening at http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
