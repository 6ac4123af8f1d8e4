//! # docli-cli
//!
//! Generates documentation fragments from structured data.
//!
//! This is the main entry point for the docli tool. It handles command parsing,
//! sets up logging and error handling, and dispatches to the appropriate command handlers.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{cdn::CdnArgs, CommandContext};
use output::{errors::ErrorFormatter, OutputHandler};

/// Generate documentation snippets from data files and templates
#[derive(Parser)]
#[command(name = "docli", version, about = "Generate documentation snippets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Render everything but don't write files
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate documentation files
    #[command(alias = "gen")]
    Generate {
        #[command(subcommand)]
        target: GenerateCommand,
    },
}

#[derive(Subcommand)]
pub enum GenerateCommand {
    /// Generate HTML import snippets pinned to the latest versions
    Cdn(CdnArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    setup_panic_handler();

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    rt.block_on(async {
        let ctx = CommandContext::new(OutputHandler::new(cli.quiet, cli.dry_run))?;

        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling outstanding requests");
                interrupt.cancel();
            }
        });

        let result = commands::dispatch_command(cli.command, &ctx, &cancel).await;
        ctrl_c.abort();
        result
    })
}

fn setup_logging(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("docli={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("docli encountered an unexpected error: {}", panic_info);
        eprintln!("docli crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/algolia/docli/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
