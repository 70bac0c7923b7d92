//! Sorteador - raffle lists with fair-mode draws
//!
//! Command-line front-end over `sorteador-core`. Loads configuration,
//! opens the database, runs one command and prints its output.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod state;

use cli::Cli;
use state::AppState;

fn main() {
    let cli = Cli::parse();

    let config = match AppState::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let default_filter = if cli.verbose {
        "sorteador_core=debug,sorteador_app=debug,info"
    } else {
        config.logging.filter.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    tracing::debug!(?config, "Configuration loaded");

    let mut app_state = match AppState::new(config, cli.database.as_deref()) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match commands::dispatch(&mut app_state, cli.command) {
        Ok(output) => print!("{}", with_newline(output)),
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn with_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
