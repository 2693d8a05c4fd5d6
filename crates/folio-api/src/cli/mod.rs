//! CLI definitions for the `folio` binary.

pub mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Portfolio chat proxy.
#[derive(Parser)]
#[command(name = "folio", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (TOML). Defaults to `folio.toml`.
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Detailed output (-v for debug, -vv for trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Address to bind (overrides `[server] host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `[server] port`).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the effective configuration as TOML.
    Config,

    /// Build and print the knowledge context the assistant would see.
    Context,
}
