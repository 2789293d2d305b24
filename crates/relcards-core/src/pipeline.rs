//! Batch run: one card per descriptor, then one document patch.
//!
//! Items are processed strictly in order. A failure inside one item never
//! stops the run; the item is rendered with whatever it resolved before the
//! fault and reported as degraded.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use crate::apps::AppDescriptor;
use crate::patch::{self, Markers, PatchOutcome};
use crate::release;
use crate::render::{render_card, CardData};
use crate::resolver::{ArtifactHasher, ReleaseSource};

/// Prefix of the checksum line when hashing failed.
pub const CHECKSUM_ERROR_PREFIX: &str = "Erro: ";

/// Result of processing one descriptor. Both variants carry a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Rendered { name: String, card: String },
    Degraded { name: String, card: String, reason: String },
}

impl ItemOutcome {
    pub fn name(&self) -> &str {
        match self {
            ItemOutcome::Rendered { name, .. } | ItemOutcome::Degraded { name, .. } => name,
        }
    }

    pub fn card(&self) -> &str {
        match self {
            ItemOutcome::Rendered { card, .. } | ItemOutcome::Degraded { card, .. } => card,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ItemOutcome::Rendered { .. } => None,
            ItemOutcome::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Knobs for one run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions<'a> {
    pub markers: Markers<'a>,
    pub download_label: &'a str,
    /// Pause after each descriptor.
    pub pace: Duration,
    pub dry_run: bool,
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub items: Vec<ItemOutcome>,
    pub outcome: PatchOutcome,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|i| i.failure().is_some())
    }
}

/// Resolve version, URL and checksum for one descriptor.
///
/// Returns the data gathered so far together with the first fault, if any.
/// Checksum failures are not faults: they become the visible checksum text.
pub fn resolve_card_data<R, H>(
    app: &AppDescriptor,
    releases: &R,
    hasher: &H,
) -> (CardData, Option<anyhow::Error>)
where
    R: ReleaseSource + ?Sized,
    H: ArtifactHasher + ?Sized,
{
    let mut data = CardData {
        version: None,
        download_url: app.fallback_url().to_string(),
        checksum: None,
    };

    if let Some(repo) = app.repo() {
        match releases.latest_release(repo) {
            Ok(Some(rel)) => {
                data.download_url =
                    release::download_url(&rel, app.asset_contains.as_deref(), &data.download_url);
                data.version = rel.version;
            }
            Ok(None) => {}
            Err(e) => return (data, Some(e.context(format!("release lookup for {repo}")))),
        }
    }

    if app.compute_checksum {
        data.checksum = Some(match hasher.sha256(&data.download_url) {
            Ok(digest) => digest,
            Err(e) => {
                tracing::warn!("checksum of {} failed: {}", data.download_url, e);
                format!("{CHECKSUM_ERROR_PREFIX}{e}")
            }
        });
    }

    (data, None)
}

/// Process one descriptor into a card.
pub fn process_app<R, H>(
    app: &AppDescriptor,
    releases: &R,
    hasher: &H,
    download_label: &str,
) -> ItemOutcome
where
    R: ReleaseSource + ?Sized,
    H: ArtifactHasher + ?Sized,
{
    let (data, fault) = resolve_card_data(app, releases, hasher);
    let card = render_card(app, &data, download_label);
    let name = app.name.clone();
    match fault {
        None => ItemOutcome::Rendered { name, card },
        Some(e) => ItemOutcome::Degraded {
            name,
            card,
            reason: format!("{e:#}"),
        },
    }
}

/// Render every descriptor in order, pausing `pace` after each one.
pub fn render_all<R, H>(
    apps: &[AppDescriptor],
    releases: &R,
    hasher: &H,
    download_label: &str,
    pace: Duration,
) -> Vec<ItemOutcome>
where
    R: ReleaseSource + ?Sized,
    H: ArtifactHasher + ?Sized,
{
    let mut items = Vec::with_capacity(apps.len());
    for app in apps {
        let item = process_app(app, releases, hasher, download_label);
        match item.failure() {
            Some(reason) => tracing::error!("failed to process {}: {}", item.name(), reason),
            None => tracing::debug!("rendered card for {}", item.name()),
        }
        items.push(item);
        if !pace.is_zero() {
            std::thread::sleep(pace);
        }
    }
    items
}

/// Full run: render all cards and patch them into `document`.
///
/// Only reading or writing the document is fatal here.
pub fn run<R, H>(
    apps: &[AppDescriptor],
    document: &Path,
    releases: &R,
    hasher: &H,
    opts: RunOptions<'_>,
) -> Result<RunReport>
where
    R: ReleaseSource + ?Sized,
    H: ArtifactHasher + ?Sized,
{
    tracing::info!("processing {} app(s)", apps.len());
    let items = render_all(apps, releases, hasher, opts.download_label, opts.pace);
    let cards: Vec<String> = items.iter().map(|i| i.card().to_string()).collect();
    let outcome = patch::patch_file(document, &cards, opts.markers, opts.dry_run)?;
    Ok(RunReport { items, outcome })
}
