//! CLI entry point for wod.

mod cli;
mod commands;
mod output;

use clap::Parser;
use wod_constant::app;
use wod_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load the nearest `.env`, walking up from the current directory.
fn load_env_file() {
    let Ok(mut dir) = std::env::current_dir() else {
        return;
    };
    for _ in 0..32 {
        let env_file = dir.join(app::ENV_FILE);
        if env_file.exists() {
            let _ = dotenvy::from_path(&env_file);
            return;
        }
        if !dir.pop() {
            return;
        }
    }
}

fn init_logging(verbose: bool) {
    let config = match ObservabilityConfig::from_env(app::SERVICE_NAME) {
        Ok(config) => config,
        Err(e) => {
            output::warning(&e.to_string());
            ObservabilityConfig::new(app::SERVICE_NAME)
        }
    };
    let config = if verbose { config.with_log_level("debug") } else { config };
    if let Err(e) = wod_observability::init(config) {
        output::warning(&e.to_string());
    }
}

#[tokio::main]
async fn main() {
    load_env_file();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(cli.verbose);

    if let Err(e) = commands::handle(cli).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
