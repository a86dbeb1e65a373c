//! Annotest CLI - Main Entry Point

use clap::Parser;
use tracing::debug;

use annotest_cli::output::{print_error, print_success};
use annotest_cli::{run, Cli, Config, RunOptions};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(&format!("{:#}", e));
            std::process::exit(2);
        }
    };

    // Initialize logging
    let log_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    debug!(?cli, "Arguments");
    debug!(?config, "Configuration");

    let options = RunOptions {
        list_only: cli.list,
        format: cli.format,
    };

    match run(&config, options).await {
        Ok(true) => {
            if !cli.list {
                print_success("Run complete");
            }
        }
        Ok(false) => std::process::exit(1),
        Err(e) => {
            print_error(&format!("{:#}", e));
            std::process::exit(2);
        }
    }
}
