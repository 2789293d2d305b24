//! SHA-256 of downloadable artifacts, bounded by a byte budget.
//!
//! Bytes are hashed as they arrive; nothing is buffered beyond one chunk.
//! The budget is checked on every chunk so an oversized artifact is
//! abandoned as soon as it crosses the limit.

use crate::config::Settings;
use crate::http::{self, StreamError};
use crate::resolver::ArtifactHasher;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("artifact larger than the {limit}-byte checksum limit")]
    Oversize { limit: u64 },
    #[error("download failed: {0}")]
    Fetch(#[from] curl::Error),
    #[error("download returned HTTP {0}")]
    Http(u32),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("read {}: {source}", path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ChecksumError {
    pub fn is_oversize(&self) -> bool {
        matches!(self, ChecksumError::Oversize { .. })
    }
}

/// Running SHA-256 plus byte count, refusing input past `limit` bytes.
pub struct BudgetedSha256 {
    hasher: Sha256,
    total: u64,
    limit: u64,
}

impl BudgetedSha256 {
    pub fn new(limit: u64) -> Self {
        Self {
            hasher: Sha256::new(),
            total: 0,
            limit,
        }
    }

    /// Feed one chunk. Fails once the running total exceeds the limit.
    pub fn update(&mut self, chunk: &[u8]) -> Result<(), ChecksumError> {
        self.total += chunk.len() as u64;
        if self.total > self.limit {
            return Err(ChecksumError::Oversize { limit: self.limit });
        }
        self.hasher.update(chunk);
        Ok(())
    }

    pub fn bytes_hashed(&self) -> u64 {
        self.total
    }

    /// Lowercase hex digest.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

/// Hash everything `reader` yields, in `BUF_SIZE` chunks.
pub fn sha256_reader<R: Read>(mut reader: R, limit: u64) -> Result<String, ChecksumError> {
    let mut digest = BudgetedSha256::new(limit);
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        digest.update(&buf[..n])?;
    }
    Ok(digest.finish())
}

/// Compute SHA-256 of a local file.
pub fn sha256_path(path: &Path, limit: u64) -> Result<String, ChecksumError> {
    let file_err = |source| ChecksumError::File {
        path: path.to_path_buf(),
        source,
    };
    let f = File::open(path).map_err(file_err)?;
    sha256_reader(f, limit).map_err(|e| match e {
        ChecksumError::Io(source) => file_err(source),
        other => other,
    })
}

/// Stream `url` and compute its SHA-256, aborting the transfer as soon as
/// more than `limit` bytes have arrived.
pub fn sha256_url(url: &str, limit: u64, stall_timeout: Duration) -> Result<String, ChecksumError> {
    let mut digest = BudgetedSha256::new(limit);
    let result = http::get_streaming(url, stall_timeout, |chunk| digest.update(chunk));
    match result {
        Ok(received) => {
            tracing::debug!("hashed {} bytes from {}", received, url);
            Ok(digest.finish())
        }
        Err(StreamError::Sink(e)) => Err(e),
        Err(StreamError::Curl(e)) => Err(ChecksumError::Fetch(e)),
        Err(StreamError::Http(code)) => Err(ChecksumError::Http(code)),
    }
}

/// [`ArtifactHasher`] that streams over HTTP with a fixed budget.
#[derive(Debug, Clone, Copy)]
pub struct HttpHasher {
    pub limit: u64,
    pub stall_timeout: Duration,
}

impl HttpHasher {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            limit: settings.max_checksum_bytes,
            stall_timeout: settings.download_timeout(),
        }
    }
}

impl ArtifactHasher for HttpHasher {
    fn sha256(&self, url: &str) -> Result<String, ChecksumError> {
        sha256_url(url, self.limit, self.stall_timeout)
    }
}
