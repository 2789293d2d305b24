//! Subset of the GitHub "latest release" response body.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReleaseBody {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub assets: Vec<AssetBody>,
}

#[derive(Debug, Deserialize)]
pub struct AssetBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub browser_download_url: String,
}
