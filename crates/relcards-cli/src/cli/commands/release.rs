//! `relcards release <owner/name>` – show the latest release and chosen asset.

use anyhow::Result;
use relcards_core::config::{ApiAuth, Settings};
use relcards_core::release::{self, GithubReleases};

pub fn run_release(cfg: &Settings, repo: &str, prefer: Option<&str>) -> Result<()> {
    let client = GithubReleases::from_settings(cfg, ApiAuth::from_env());
    let Some(rel) = client.fetch_latest(repo)? else {
        anyhow::bail!("no published release for {repo}");
    };

    println!("Version: {}", rel.version.as_deref().unwrap_or("-"));
    if rel.assets.is_empty() {
        println!("Assets:  (none)");
    } else {
        println!("Assets:");
        for a in &rel.assets {
            println!("  {:<40} {}", a.name, a.download_url);
        }
    }
    println!("Download: {}", release::download_url(&rel, prefer, "-"));
    Ok(())
}
