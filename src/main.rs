//! Paramsync - sync environment variables and secrets into SSM and ECS.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use paramsync::cli::output;
use paramsync::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("PARAMSYNC_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("paramsync=debug")
        } else {
            EnvFilter::new("paramsync=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
