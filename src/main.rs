//! mstranslate CLI binary entry point.

use clap::Parser;
use mstranslate::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Token => commands::handle_token().await,
        Commands::Translate(args) => commands::handle_translate(args).await,
        Commands::TranslateArray(args) => commands::handle_translate_array(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
