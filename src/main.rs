//! clapwrap CLI - Entry point
//!
//! Usage: clapwrap <command> [options]

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clapwrap::config::Config;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            return ExitCode::FAILURE;
        }
    };

    match clapwrap::cli::build(&config) {
        Ok(group) => group.main(),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
