use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default release API host.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default checksum budget: 200 MiB.
pub const DEFAULT_MAX_CHECKSUM_BYTES: u64 = 200 * 1024 * 1024;

pub const DEFAULT_START_MARKER: &str = "<!-- APPS_CARDS -->";
pub const DEFAULT_END_MARKER: &str = "<!-- /APPS_CARDS -->";

/// Environment variables checked (in order) for an API token.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "INPUT_GITHUB_TOKEN"];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("read settings {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("locate settings directory: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
}

/// Run settings (optional `config.toml`). Every key has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the release API (no trailing slash needed).
    pub api_base: String,
    /// Total timeout for one release lookup, in seconds.
    pub api_timeout_secs: u64,
    /// Connect timeout and stall window for artifact downloads, in seconds.
    pub download_timeout_secs: u64,
    /// Abort checksum computation once this many bytes have been read.
    pub max_checksum_bytes: u64,
    /// Pause after each descriptor, in milliseconds.
    pub pace_delay_ms: u64,
    pub start_marker: String,
    pub end_marker: String,
    /// Text of the download button in each card.
    pub download_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_timeout_secs: 20,
            download_timeout_secs: 30,
            max_checksum_bytes: DEFAULT_MAX_CHECKSUM_BYTES,
            pace_delay_ms: 500,
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            download_label: "Download oficial".to_string(),
        }
    }
}

impl Settings {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn pace_delay(&self) -> Duration {
        Duration::from_millis(self.pace_delay_ms)
    }

    pub fn markers(&self) -> crate::patch::Markers<'_> {
        crate::patch::Markers {
            start: &self.start_marker,
            end: &self.end_marker,
        }
    }
}

/// Bearer token for the release API, resolved once at startup.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiAuth {
    token: Option<String>,
}

impl ApiAuth {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Empty tokens count as absent.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    /// First non-empty value among [`TOKEN_ENV_VARS`].
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        TOKEN_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(Self::with_token)
            .find(ApiAuth::is_authenticated)
            .unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value, if a token is configured.
    pub fn header_value(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("token {t}"))
    }
}

// Never print the token itself.
impl std::fmt::Debug for ApiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiAuth")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

pub fn config_path() -> Result<PathBuf, SettingsError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("relcards")?;
    Ok(xdg_dirs.get_config_home().join("relcards").join("config.toml"))
}

/// Load settings from `path`.
pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&data).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings from the XDG config file, or defaults if there is none.
pub fn load_or_default() -> Result<Settings, SettingsError> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let cfg = load_from(&path)?;
    tracing::info!("loaded settings from {}", path.display());
    Ok(cfg)
}
