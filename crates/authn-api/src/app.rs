//! Server runner: wires state into the router and serves it until a
//! shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, warn};

use authn_core::config::AppConfig;
use authn_core::error::AppError;
use authn_core::traits::{NoopLoginHook, SystemClock};
use authn_database::DatabasePool;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with the production clock and
/// no login-attempt policy.
pub fn build_app(config: AppConfig, db: &DatabasePool) -> Result<Router, AppError> {
    let state = AppState::new(
        config,
        db.pool().clone(),
        Arc::new(SystemClock),
        Arc::new(NoopLoginHook),
    )?;
    Ok(build_router(state))
}

/// Runs the authn server with the given configuration and database pool.
///
/// In-flight requests get `server.shutdown_grace_seconds` to finish after
/// the signal; the pool is closed afterwards.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    info!(
        cookie = %config.cookie.name,
        secure = config.cookie.secure,
        same_site = %config.cookie.same_site,
        idle_ttl = config.session.idle_ttl_seconds,
        absolute_ttl = config.session.absolute_ttl_seconds,
        "Session policy"
    );
    if config.dev.user_seeding_allowed() {
        warn!("Dev user seeding endpoint is enabled");
    }

    let app = build_app(config, &db)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("authn server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    tokio::select! {
        result = async { server.await } => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_seconds = grace.as_secs(), "Grace period elapsed; dropping open connections");
        }
    }

    db.close().await;
    info!("authn server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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
}
