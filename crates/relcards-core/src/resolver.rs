//! Interfaces the pipeline uses to reach the network.
//!
//! The pipeline only depends on these traits and does not know about curl
//! or the GitHub API shape; tests substitute in-memory fakes.

use crate::checksum::ChecksumError;
use crate::release::ReleaseInfo;

/// Looks up the latest published release of a repository.
pub trait ReleaseSource {
    /// `Ok(None)` when the repository has no (visible) release.
    fn latest_release(&self, repo: &str) -> anyhow::Result<Option<ReleaseInfo>>;
}

/// Computes the checksum of a downloadable artifact.
pub trait ArtifactHasher {
    /// Lowercase hex SHA-256 of the content behind `url`.
    fn sha256(&self, url: &str) -> Result<String, ChecksumError>;
}

impl<T: ReleaseSource + ?Sized> ReleaseSource for &T {
    fn latest_release(&self, repo: &str) -> anyhow::Result<Option<ReleaseInfo>> {
        (**self).latest_release(repo)
    }
}

impl<T: ArtifactHasher + ?Sized> ArtifactHasher for &T {
    fn sha256(&self, url: &str) -> Result<String, ChecksumError> {
        (**self).sha256(url)
    }
}
