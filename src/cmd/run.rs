//! `httpsvc run` — start the HTTP server.
//!
//! Resolves the runtime [`Config`], installs logging (stdout plus the
//! log file) wired to the shared [`LogLevelControl`], and serves until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::HttpsvcError;
use crate::logging;
use crate::server::{self, AppState};
use crate::severity::LogLevelControl;

pub async fn execute(args: RunArgs) -> Result<(), HttpsvcError> {
    let config = Config::from_run_args(&args);
    let log_level = LogLevelControl::new(config.initial_severity);
    let log_dir = if args.log_path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        args.log_path.as_path()
    };
    let _log_guard = logging::init(
        &log_level,
        logging::resolve_format(args.pretty, args.json),
        (!args.no_log_file).then_some(log_dir),
    )?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "start server error");
            return Err(e.into());
        }
    };

    tracing::info!(
        addr = %addr,
        mode = ?config.mode,
        version = %config.version,
        level = %log_level.get(),
        "httpsvc started"
    );

    let state = Arc::new(AppState::new(config, log_level));
    let router = server::build_router(Arc::clone(&state), args.max_body);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(server::shutdown_signal())
    .await?;

    tracing::info!(
        uptime_seconds = state.start_time.elapsed().as_secs(),
        "httpsvc stopped"
    );
    Ok(())
}
