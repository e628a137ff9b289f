//! Log severity threshold and the shared cell that holds it.
//!
//! [`LogLevelControl`] is created once at startup and cloned into the
//! router state. Reads are a single atomic load; writes also push the new
//! threshold into the `tracing` filter through the attached reload handle.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::{LevelFilter, Targets};

use crate::error::HttpsvcError;

/// Reload handle for the subscriber's filter layer.
pub type LogReloadHandle =
    tracing_subscriber::reload::Handle<Targets, tracing_subscriber::Registry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogSeverity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl LogSeverity {
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// `tracing` has nothing above ERROR, so `Fatal` silences everything.
    #[must_use]
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Fatal => LevelFilter::OFF,
        }
    }

    const fn from_repr(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Debug),
            1 => Some(Self::Info),
            2 => Some(Self::Warn),
            3 => Some(Self::Error),
            4 => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogSeverity {
    type Err = HttpsvcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            // zap's panic levels sit between error and fatal
            "dpanic" | "panic" | "fatal" => Ok(Self::Fatal),
            _ => Err(HttpsvcError::InvalidLevelName(s.to_string())),
        }
    }
}

#[derive(Debug)]
struct Inner {
    level: AtomicU8,
    reload: OnceLock<LogReloadHandle>,
    /// Serializes writers so the cell and the filter never disagree.
    write: Mutex<()>,
}

/// Process-wide severity threshold, shared by handle.
#[derive(Debug, Clone)]
pub struct LogLevelControl {
    inner: Arc<Inner>,
}

impl LogLevelControl {
    #[must_use]
    pub fn new(initial: LogSeverity) -> Self {
        Self {
            inner: Arc::new(Inner {
                level: AtomicU8::new(initial as u8),
                reload: OnceLock::new(),
                write: Mutex::new(()),
            }),
        }
    }

    /// Connect the cell to the logging subsystem. Only the first handle
    /// attached is kept.
    pub fn attach(&self, handle: LogReloadHandle) {
        if self.inner.reload.set(handle).is_err() {
            tracing::warn!("log reload handle already attached, ignoring");
        }
    }

    #[must_use]
    pub fn get(&self) -> LogSeverity {
        LogSeverity::from_repr(self.inner.level.load(Ordering::Acquire))
            .unwrap_or(LogSeverity::Info)
    }

    /// Replace the threshold. When the logging filter cannot be reloaded
    /// the previous value is restored.
    pub fn set(&self, level: LogSeverity) -> Result<(), HttpsvcError> {
        let _writer = self
            .inner
            .write
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = self.inner.level.swap(level as u8, Ordering::AcqRel);

        let Some(handle) = self.inner.reload.get() else {
            return Ok(());
        };

        let filter = Targets::new().with_default(level.to_level_filter());
        if let Err(e) = handle.reload(filter) {
            self.inner.level.store(previous, Ordering::Release);
            return Err(HttpsvcError::LogReload(e.to_string()));
        }
        Ok(())
    }
}
