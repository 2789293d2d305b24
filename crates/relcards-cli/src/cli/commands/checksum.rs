//! `relcards checksum <url-or-path>` – SHA-256 within a size limit.

use anyhow::Result;
use relcards_core::checksum;
use relcards_core::config::Settings;
use std::path::Path;

/// Compute and print SHA-256 of a local file or URL.
pub fn run_checksum(cfg: &Settings, target: &str, max_bytes: Option<u64>) -> Result<()> {
    let limit = max_bytes.unwrap_or(cfg.max_checksum_bytes);
    let path = Path::new(target);
    let digest = if path.is_file() {
        checksum::sha256_path(path, limit)?
    } else {
        checksum::sha256_url(target, limit, cfg.download_timeout())?
    };
    println!("{}  {}", digest, target);
    Ok(())
}
