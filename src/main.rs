//! parley CLI binary entry point.

use clap::Parser;
use parley::cli::{Cli, Commands};
use parley::config::ParleyConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match ParleyConfig::from_env() {
        Ok(mut config) => match cli.command {
            Commands::Chat(args) => match args.apply(&mut config) {
                Ok(()) => parley::cli::repl::run_chat(config).await,
                Err(e) => Err(e),
            },
            Commands::Key(args) => parley::cli::key::handle_key(args, config),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PARLEY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
