//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Multi-tenant documentation host
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: docserve.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "docserve.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve documentation for every configured project
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Number of request worker threads
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Show how a missing page at URL would be answered
    #[command(visible_alias = "r")]
    Resolve {
        /// Absolute URL of the missing page, e.g. https://pip.example.io/en/v1/gone/
        #[arg(value_hint = clap::ValueHint::Url)]
        url: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}
