//! `relcards update` – rebuild the card listing.

use anyhow::Result;
use relcards_core::apps;
use relcards_core::checksum::HttpHasher;
use relcards_core::config::{ApiAuth, Settings};
use relcards_core::patch::PatchOutcome;
use relcards_core::pipeline::{self, RunOptions};
use relcards_core::release::GithubReleases;

use crate::cli::{UpdateArgs, EXIT_MARKERS_NOT_FOUND, EXIT_OK};

/// Apply command-line overrides on top of the loaded settings.
pub(crate) fn effective_settings(mut cfg: Settings, args: &UpdateArgs) -> Settings {
    if let Some(ms) = args.delay_ms {
        cfg.pace_delay_ms = ms;
    }
    if let Some(bytes) = args.max_checksum_bytes {
        cfg.max_checksum_bytes = bytes;
    }
    cfg
}

pub fn run_update(cfg: Settings, args: &UpdateArgs) -> Result<u8> {
    let cfg = effective_settings(cfg, args);

    // Config errors are fatal and must stop the run before any request.
    let apps = apps::load_apps(&args.apps)?;

    let auth = ApiAuth::from_env();
    if !auth.is_authenticated() {
        tracing::info!("no API token set; using unauthenticated requests");
    }
    let releases = GithubReleases::from_settings(&cfg, auth);
    let hasher = HttpHasher::from_settings(&cfg);
    let opts = RunOptions {
        markers: cfg.markers(),
        download_label: &cfg.download_label,
        pace: cfg.pace_delay(),
        dry_run: args.dry_run,
    };

    let report = pipeline::run(&apps, &args.output, &releases, &hasher, opts)?;
    for item in report.failures() {
        if let Some(reason) = item.failure() {
            eprintln!("Error processing {}: {}", item.name(), reason);
        }
    }

    let doc = args.output.display();
    match report.outcome {
        PatchOutcome::Updated if args.dry_run => println!("{doc} would be updated (dry run)."),
        PatchOutcome::Updated => println!("{doc} updated."),
        PatchOutcome::Unchanged => println!("No changes."),
        PatchOutcome::MarkersNotFound => {
            eprintln!("Markers not found in {doc}");
            return Ok(EXIT_MARKERS_NOT_FOUND);
        }
    }
    Ok(EXIT_OK)
}
