use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::FileSlot;

/// Where the persisted slot lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            key: default_key(),
        }
    }
}

impl StorageConfig {
    /// The file slot this configuration points at.
    #[must_use]
    pub fn slot(&self) -> FileSlot {
        FileSlot::new(self.dir.clone(), self.key.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".daylist"), |dir| dir.join("daylist"))
}

fn default_key() -> String {
    "todos".to_string()
}

/// Load the session config from `<path>/config.toml`.
///
/// A missing file yields defaults. Unlike the store's persistence path, a
/// malformed config is a real error: silently ignoring it would send the
/// session to the wrong slot.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load_session_config(config_dir: &Path) -> Result<SessionConfig> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Ok(SessionConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<SessionConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
