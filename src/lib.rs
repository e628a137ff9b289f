//! httpsvc is a small HTTP service for exercising proxies and load balancers.
//!
//! It echoes request headers back to the caller, reports the client address
//! it sees (honouring `X-Real-IP` and `X-Forwarded-For`), answers a health
//! check, and lets operators change the log level at runtime.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`config`] -- Runtime configuration resolved once at startup.
//! - [`client_ip`] -- Client address resolution from proxy headers and the
//!   peer socket address.
//! - [`echo`] -- `GET /` header-echo handler.
//! - [`error`] -- Unified error type using `thiserror`.
//! - [`health`] -- `GET /healthz` endpoint handler.
//! - [`loggers`] -- `/log/level` endpoint for runtime log level changes.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum router, shared application state, and graceful
//!   shutdown.
//! - [`severity`] -- Log severity enum and the shared threshold cell.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod client_ip;
pub mod cmd;
pub mod config;
pub mod echo;
pub mod error;
pub mod health;
pub mod loggers;
pub mod logging;
pub mod server;
pub mod severity;
