use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = httpsvc::cli::Cli::parse();
    if let Err(e) = httpsvc::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
