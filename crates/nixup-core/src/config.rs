use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_LOG_FILE: &str = "/var/log/nixos-update.log";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    pub log_file: PathBuf,
    /// Exit non-zero when the upgrade command fails. Off by default.
    pub fail_on_update_error: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            fail_on_update_error: false,
        }
    }
}

impl UpdaterConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse updater config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read updater config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid updater config: {}", path.display()))
    }
}
