//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding the resolved
//! config and the log level cell), [`build_router`] for wiring the
//! endpoints behind the middleware layers (every unmatched path is
//! answered by the echo handler), and [`shutdown_signal`] for
//! SIGTERM / Ctrl+C handling.

use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::echo::echo_handler;
use crate::health::healthz_handler;
use crate::loggers;
use crate::severity::LogLevelControl;

pub struct AppState {
    pub config: Config,
    pub log_level: LogLevelControl,
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, log_level: LogLevelControl) -> Self {
        Self {
            config,
            log_level,
            start_time: Instant::now(),
        }
    }
}

pub fn build_router(state: Arc<AppState>, max_body: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route(
            "/log/level",
            get(loggers::get_level_handler)
                .put(loggers::set_level_handler)
                .post(loggers::set_level_handler),
        )
        .fallback(echo_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body)),
        )
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
