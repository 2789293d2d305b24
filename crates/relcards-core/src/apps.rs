//! Application descriptors loaded from `apps.yaml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// URL used when a descriptor has no `url_oficial`.
pub const FALLBACK_URL: &str = "#";

#[derive(Debug, Error)]
pub enum AppsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// One configured application, rendered as one card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppDescriptor {
    #[serde(default, rename = "nome")]
    pub name: String,
    #[serde(default, rename = "descricao")]
    pub description: String,
    #[serde(default, rename = "sistema")]
    pub platform: String,
    #[serde(default, rename = "url_oficial")]
    pub official_url: Option<String>,
    /// `owner/name` of the repository publishing releases.
    #[serde(default, rename = "github_repo")]
    pub repo: Option<String>,
    #[serde(default)]
    pub compute_checksum: bool,
    /// Prefer the first asset whose name contains this (case-insensitive).
    #[serde(default)]
    pub asset_contains: Option<String>,
}

impl AppDescriptor {
    /// Static download URL, `#` when unset or empty.
    pub fn fallback_url(&self) -> &str {
        self.official_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(FALLBACK_URL)
    }

    /// Repository identifier, ignoring blank values.
    pub fn repo(&self) -> Option<&str> {
        self.repo.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
struct AppsFile {
    #[serde(default)]
    apps: Vec<AppDescriptor>,
}

/// Parse descriptors from YAML text. A missing `apps` key (or an empty
/// document) yields an empty list.
pub fn parse_apps(text: &str) -> Result<Vec<AppDescriptor>, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: Option<AppsFile> = serde_yaml::from_str(text)?;
    Ok(file.unwrap_or_default().apps)
}

/// Load descriptors from a YAML file, in file order.
pub fn load_apps(path: &Path) -> Result<Vec<AppDescriptor>, AppsError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let apps = parse_apps(&text).map_err(|source| AppsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded {} app(s) from {}", apps.len(), path.display());
    Ok(apps)
}
