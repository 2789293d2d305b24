//! Latest-release lookup against the GitHub REST API.
//!
//! One GET per repository. A non-200 answer means "no release" and the
//! caller keeps its static URL; only transport failures and unreadable
//! bodies are errors.

mod parse;
mod select;

pub use select::{download_url, pick_asset};

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::{ApiAuth, Settings};
use crate::http::{self, Header};
use crate::resolver::ReleaseSource;

use parse::ReleaseBody;

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub download_url: String,
}

/// The parts of a published release the cards need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Tag name, else release name.
    pub version: Option<String>,
    /// In API order.
    pub assets: Vec<Asset>,
    /// Release web page.
    pub html_url: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

impl From<ReleaseBody> for ReleaseInfo {
    fn from(body: ReleaseBody) -> Self {
        ReleaseInfo {
            version: non_empty(body.tag_name).or_else(|| non_empty(body.name)),
            assets: body
                .assets
                .into_iter()
                .map(|a| Asset {
                    name: a.name,
                    download_url: a.browser_download_url,
                })
                .collect(),
            html_url: non_empty(body.html_url),
        }
    }
}

/// Parse a latest-release JSON body.
pub fn parse_release(bytes: &[u8]) -> Result<ReleaseInfo> {
    let body: ReleaseBody = serde_json::from_slice(bytes).context("parse release JSON")?;
    Ok(body.into())
}

/// Curl-backed client for `GET /repos/{owner}/{name}/releases/latest`.
#[derive(Debug, Clone)]
pub struct GithubReleases {
    api_base: String,
    auth: ApiAuth,
    timeout: Duration,
}

impl GithubReleases {
    pub fn new(api_base: impl Into<String>, auth: ApiAuth, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            auth,
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings, auth: ApiAuth) -> Self {
        Self::new(settings.api_base.clone(), auth, settings.api_timeout())
    }

    pub fn latest_url(&self, repo: &str) -> String {
        format!(
            "{}/repos/{}/releases/latest",
            self.api_base.trim_end_matches('/'),
            repo.trim_matches('/')
        )
    }

    fn headers(&self) -> Vec<Header> {
        let mut headers = vec![("Accept", "application/vnd.github+json".to_string())];
        if let Some(value) = self.auth.header_value() {
            headers.push(("Authorization", value));
        }
        headers
    }

    /// Latest published release of `repo` (`owner/name`), or `None` when the
    /// API does not answer 200.
    pub fn fetch_latest(&self, repo: &str) -> Result<Option<ReleaseInfo>> {
        let url = self.latest_url(repo);
        let resp = http::get(&url, &self.headers(), self.timeout)?;
        if resp.status != 200 {
            tracing::debug!("no release for {}: HTTP {}", repo, resp.status);
            return Ok(None);
        }
        let release = parse_release(&resp.body).with_context(|| format!("release of {repo}"))?;
        tracing::debug!(
            "{}: version={:?} assets={}",
            repo,
            release.version,
            release.assets.len()
        );
        Ok(Some(release))
    }
}

impl ReleaseSource for GithubReleases {
    fn latest_release(&self, repo: &str) -> Result<Option<ReleaseInfo>> {
        self.fetch_latest(repo)
    }
}
