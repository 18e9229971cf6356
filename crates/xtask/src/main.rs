//! Development tasks for the tactics workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{CheckContent, Preview};

/// Development tasks for the tactics workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for tactics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Evaluate a scenario's orders and print each resolution ledger
    Preview(Preview),

    /// Load and cross-check every scenario and order file
    CheckContent(CheckContent),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Preview(cmd) => cmd.execute(),
        Command::CheckContent(cmd) => cmd.execute(),
    }
}
