//! Configuration file support for spmready
//!
//! Reads configuration from `~/.config/spmready/config.json`:
//!
//! ```json
//! {
//!   "index_url": "https://cocoapods.org",
//!   "github_url": "https://github.com",
//!   "branch": "master",
//!   "manifest_file": "Package.swift",
//!   "timeout_secs": 20,
//!   "pod_command": "pod",
//!   "overrides": {
//!     "somepod": {
//!       "repo": "https://github.com/someone/somepod"
//!     }
//!   }
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults shown above.

use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::probe::{DEFAULT_BRANCH, DEFAULT_MANIFEST_FILE};
use crate::resolve::{DEFAULT_INDEX_URL, DEFAULT_POD_COMMAND};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default hosting service that Carthage `github` shorthands point at
pub const DEFAULT_GITHUB_URL: &str = "https://github.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine config directory. HOME environment variable not set.")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Library-specific override configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct PackageOverride {
    /// Repository URL to use instead of resolving one
    pub repo: Option<String>,
}

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Package index queried for pods without a known repository
    pub index_url: String,

    /// Hosting base for Carthage `github "org/repo"` declarations
    pub github_url: String,

    /// Branch probed for the package manifest
    pub branch: String,

    /// Package manifest file name
    pub manifest_file: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// CocoaPods executable used by the `pod-search` resolver
    pub pod_command: String,

    /// Per-library repository overrides, keyed by library name
    pub overrides: HashMap<String, PackageOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            github_url: DEFAULT_GITHUB_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pod_command: DEFAULT_POD_COMMAND.to_string(),
            overrides: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default path or return defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path, defaulting when it is absent
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Request timeout; never zero
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Look up a repository override for a library, ignoring case
    pub fn repo_override(&self, package: &str) -> Option<&str> {
        self.overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(package))
            .and_then(|(_, override_cfg)| override_cfg.repo.as_deref())
    }
}

/// Returns the config file path: `~/.config/spmready/config.json`
pub fn config_path() -> Result<PathBuf, ConfigError> {
    // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".config"))
                .unwrap_or_default()
        });

    if config_base.as_os_str().is_empty() {
        return Err(ConfigError::NoConfigDir);
    }

    Ok(config_base.join("spmready").join("config.json"))
}
