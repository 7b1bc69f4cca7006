//! docserve - A multi-tenant host for built documentation.

mod catalog;
mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod model;
mod resolve;
mod store;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{HostConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = init_config(HostConfig::load(&cli)?);

    match &cli.command {
        Commands::Serve { .. } => serve(),
        Commands::Resolve { url, json } => cli::resolve::run_resolve(url, *json, &config),
    }
}

/// Bind, then serve every configured project until Ctrl+C.
fn serve() -> Result<()> {
    let config = config::cfg();
    let bound = cli::serve::bind_server(&config)?;
    bound.run(cli::serve::ServeState::new(config))
}
