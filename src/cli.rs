//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, health), and their associated argument structs.
//! Every `run` flag has an environment variable equivalent for container
//! deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::severity::LogSeverity;

#[derive(Parser)]
#[command(
    name = "httpsvc",
    version,
    about = "Header-echo HTTP service",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        httpsvc run                          Listen on :8080\n  \
        httpsvc run -p 9000 --pretty         Local dev mode\n  \
        httpsvc health                       Probe a running instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Run(RunArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        httpsvc run                                 Development mode, debug logging\n  \
        PROFILE=PROD httpsvc run                    Production mode, info logging\n  \
        httpsvc run -p 9000 --app-version 1.4.2     Custom port and Version header")]
pub struct RunArgs {
    /// Listen port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Deployment profile (`PROD` enables production mode)
    #[arg(long, env = "PROFILE")]
    pub profile: Option<String>,

    /// Value reported in the `Version` response header
    #[arg(long, env = "VERSION")]
    pub app_version: Option<String>,

    // -- Logging --
    /// Initial log level (defaults to info in production, debug otherwise)
    #[arg(short, long, env = "LOG_LEVEL")]
    pub log_level: Option<LogSeverity>,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    /// Directory for the `httpsvc.log` file (logs also go to stdout)
    #[arg(long, env = "LOG_PATH", default_value = ".")]
    pub log_path: PathBuf,

    /// Log to stdout only
    #[arg(long)]
    pub no_log_file: bool,

    // -- Tuning --
    /// Max request body size in bytes
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = 1_048_576,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:8080")]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["httpsvc", "run"]).unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };
        assert!(!args.pretty && !args.json);
    }

    #[test]
    fn log_level_accepts_any_case() {
        let cli = Cli::try_parse_from(["httpsvc", "run", "--log-level", "WARN"]).unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.log_level, Some(LogSeverity::Warn));
    }

    #[test]
    fn log_level_rejects_unknown_names() {
        assert!(Cli::try_parse_from(["httpsvc", "run", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn pretty_and_json_conflict() {
        assert!(Cli::try_parse_from(["httpsvc", "run", "--pretty", "--json"]).is_err());
    }

    #[test]
    fn health_has_default_url() {
        let cli = Cli::try_parse_from(["httpsvc", "health"]).unwrap();
        let Some(Commands::Health(args)) = cli.command else {
            panic!("expected health subcommand");
        };
        assert_eq!(args.url, "http://localhost:8080");
    }

    #[test]
    fn no_log_file_flag_parses() {
        let cli = Cli::try_parse_from(["httpsvc", "run", "--no-log-file"]).unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };
        assert!(args.no_log_file);
    }
}
