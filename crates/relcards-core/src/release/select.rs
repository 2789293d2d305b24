//! Asset selection and download URL fallback.

use super::{Asset, ReleaseInfo};

/// First asset whose name contains `prefer` (case-insensitive); otherwise the
/// first asset. `None` only for an empty list.
pub fn pick_asset<'a>(assets: &'a [Asset], prefer: Option<&str>) -> Option<&'a Asset> {
    let prefer = prefer.map(str::to_lowercase).filter(|p| !p.is_empty());
    if let Some(p) = prefer {
        if let Some(hit) = assets.iter().find(|a| a.name.to_lowercase().contains(&p)) {
            return Some(hit);
        }
    }
    assets.first()
}

/// Download URL for a release: the picked asset's URL, else the release page,
/// else `fallback`. Empty URLs count as missing.
pub fn download_url(release: &ReleaseInfo, prefer: Option<&str>, fallback: &str) -> String {
    let url = match pick_asset(&release.assets, prefer) {
        Some(asset) => Some(asset.download_url.as_str()),
        None => release.html_url.as_deref(),
    };
    url.filter(|u| !u.is_empty()).unwrap_or(fallback).to_string()
}
