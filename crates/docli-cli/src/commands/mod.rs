//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes a CommandContext.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub mod cdn;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands, GenerateCommand};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a context rooted at the process working directory
    pub fn new(output: OutputHandler) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let cwd = Utf8PathBuf::try_from(cwd).context("Current directory is not valid UTF-8")?;

        Ok(Self { cwd, output })
    }

    /// Resolve a command line path against the working directory
    pub fn resolve_path(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(
    command: Commands,
    ctx: &CommandContext,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    match command {
        Commands::Generate { target } => match target {
            GenerateCommand::Cdn(args) => {
                info!(data = %args.data, output = %args.output, "Generating CDN snippets");
                cdn::execute(args, ctx, cancel).await
            }
        },
    }
}
