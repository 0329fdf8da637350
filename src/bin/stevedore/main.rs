//! Stevedore CLI - package Next.js projects for deployment

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("stevedore=debug")
    } else if cli.quiet {
        EnvFilter::new("stevedore=warn")
    } else {
        EnvFilter::new("stevedore=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command; packaging is the implicit default
    match cli.command {
        Some(Commands::Clean) => commands::clean::execute(&cli),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        Some(Commands::Package) | None => commands::package::execute(&cli),
    }
}
