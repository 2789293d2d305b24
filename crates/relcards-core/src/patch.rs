//! Replace the marker span of an HTML document with rendered cards.
//!
//! Only the text strictly between the start and end markers changes; the
//! markers and everything around them are kept byte for byte.

use anyhow::{Context, Result};
use std::path::Path;

/// Literal comment strings bounding the generated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Updated,
    Unchanged,
    MarkersNotFound,
}

/// Rebuild `doc` with `cards` between the markers.
///
/// Uses the first start marker and the first end marker after it. Returns
/// `None` when either is missing.
pub fn splice(doc: &str, cards: &[String], markers: Markers<'_>) -> Option<String> {
    let start = doc.find(markers.start)?;
    let head_end = start + markers.start.len();
    let end = head_end + doc[head_end..].find(markers.end)?;

    let mut out = String::with_capacity(doc.len() + cards.iter().map(String::len).sum::<usize>());
    out.push_str(&doc[..head_end]);
    out.push('\n');
    out.push_str("<div class=\"cards-grid\">\n");
    out.push_str(&cards.join("\n"));
    out.push_str("\n</div>");
    out.push('\n');
    out.push_str(&doc[end..]);
    Some(out)
}

/// Splice `cards` into the document at `path`, writing only when the content
/// changes. With `dry_run` the outcome is computed but nothing is written.
pub fn patch_file(
    path: &Path,
    cards: &[String],
    markers: Markers<'_>,
    dry_run: bool,
) -> Result<PatchOutcome> {
    let doc = std::fs::read_to_string(path)
        .with_context(|| format!("read document {}", path.display()))?;

    let Some(patched) = splice(&doc, cards, markers) else {
        tracing::warn!(
            "markers {:?} / {:?} not found in {}",
            markers.start,
            markers.end,
            path.display()
        );
        return Ok(PatchOutcome::MarkersNotFound);
    };

    if patched == doc {
        return Ok(PatchOutcome::Unchanged);
    }
    if dry_run {
        tracing::info!("dry run: {} would change", path.display());
    } else {
        std::fs::write(path, patched)
            .with_context(|| format!("write document {}", path.display()))?;
        tracing::info!("wrote {} card(s) to {}", cards.len(), path.display());
    }
    Ok(PatchOutcome::Updated)
}
