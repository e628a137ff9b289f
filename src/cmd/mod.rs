//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`health`]. Each handler lives in its
//! own submodule.

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::HttpsvcError;

pub async fn dispatch(cli: Cli) -> Result<(), HttpsvcError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  httpsvc v{version} \u{2014} header-echo HTTP service\n\n  \
         No command provided. To get started:\n\n    \
         httpsvc run                   Start the server on :8080\n    \
         httpsvc health                Probe a running instance\n    \
         httpsvc --help                See all commands and options\n"
    );
}
