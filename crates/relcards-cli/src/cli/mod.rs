//! CLI for relcards.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use relcards_core::config::{self, Settings};
use std::path::PathBuf;

use commands::{run_checksum, run_release, run_update};

/// Document written (or already current).
pub const EXIT_OK: u8 = 0;
/// Fatal error: bad config, unreadable document, bad settings.
pub const EXIT_FAILURE: u8 = 1;
/// The document has no marker span; nothing was written.
pub const EXIT_MARKERS_NOT_FOUND: u8 = 2;

/// Top-level CLI for relcards.
#[derive(Debug, Parser)]
#[command(name = "relcards", version)]
#[command(about = "Render release download cards into an HTML page", long_about = None)]
pub struct Cli {
    /// Settings file (TOML). Defaults to ~/.config/relcards/config.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Rebuild the card listing between the markers of the output document.
    Update(UpdateArgs),

    /// Show the latest release of a repository and the download it resolves to.
    Release {
        /// Repository as owner/name.
        repo: String,
        /// Prefer the first asset whose name contains this text.
        #[arg(long, value_name = "TEXT")]
        prefer: Option<String>,
    },

    /// Compute SHA-256 of a URL or local file, within a size limit.
    Checksum {
        /// URL, or path to an existing file.
        target: String,
        /// Give up once more than this many bytes have been read.
        #[arg(long, value_name = "BYTES")]
        max_bytes: Option<u64>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Application list (YAML with an `apps` sequence).
    #[arg(long, default_value = "apps.yaml", value_name = "PATH")]
    pub apps: PathBuf,
    /// HTML document containing the marker comments.
    #[arg(long, default_value = "docs/index.html", value_name = "PATH")]
    pub output: PathBuf,
    /// Pause after each app, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
    /// Checksum size limit in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_checksum_bytes: Option<u64>,
    /// Compute everything but do not write the document.
    #[arg(long)]
    pub dry_run: bool,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let cfg = match path {
        Some(p) => config::load_from(p)?,
        None => config::load_or_default()?,
    };
    Ok(cfg)
}

impl CliCommand {
    /// Parse arguments, run the command, and return the process exit code.
    pub fn run_from_args() -> Result<u8> {
        let cli = Cli::parse();
        let cfg = load_settings(cli.settings.as_ref())?;
        tracing::debug!("loaded settings: {:?}", cfg);

        match cli.command {
            CliCommand::Update(args) => run_update(cfg, &args),
            CliCommand::Release { repo, prefer } => {
                run_release(&cfg, &repo, prefer.as_deref())?;
                Ok(EXIT_OK)
            }
            CliCommand::Checksum { target, max_bytes } => {
                run_checksum(&cfg, &target, max_bytes)?;
                Ok(EXIT_OK)
            }
        }
    }
}

#[cfg(test)]
mod tests;
