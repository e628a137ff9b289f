//! Structured logging setup using the `tracing` ecosystem.
//!
//! Configures a `tracing-subscriber` with either JSON output (for
//! production) or pretty-printed output (for TTY / local dev). Format
//! is auto-detected from the terminal but can be forced via `--json`
//! or `--pretty`. Events are also written to `<log dir>/httpsvc.log`
//! through a non-blocking `tracing-appender` writer unless disabled.
//!
//! The filter sits behind a reload layer whose handle is attached to the
//! [`LogLevelControl`], so `PUT /log/level` takes effect on the next event.

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::error::HttpsvcError;
use crate::severity::LogLevelControl;

pub const LOG_FILE_NAME: &str = "httpsvc.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[must_use]
pub fn resolve_format(pretty: bool, json: bool) -> LogFormat {
    if json {
        LogFormat::Json
    } else if pretty || std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Install the global subscriber. The returned guard flushes the log file
/// on drop and must live as long as the server.
pub fn init(
    control: &LogLevelControl,
    format: LogFormat,
    log_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>, HttpsvcError> {
    let (file_writer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = open_log_file(dir)?;
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let filter = Targets::new().with_default(control.get().to_level_filter());
    let (reload_filter, reload_handle) = reload::Layer::new(filter);

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(reload_filter)
                .with(fmt::layer().json().with_target(false))
                .with(file_writer.map(|w| fmt::layer().json().with_target(false).with_writer(w)))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(reload_filter)
                .with(fmt::layer().pretty())
                .with(file_writer.map(|w| fmt::layer().with_ansi(false).with_writer(w)))
                .init();
        }
    }

    control.attach(reload_handle);
    Ok(guard)
}

/// Non-rotating appender for `<dir>/httpsvc.log`; the directory is created
/// if missing.
pub fn open_log_file(dir: &Path) -> Result<(NonBlocking, WorkerGuard), HttpsvcError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)?;
    Ok(tracing_appender::non_blocking(appender))
}
