//! API key resolution for code-smells.
//!
//! The key is looked up once before any analysis runs: the
//! `ANTHROPIC_API_KEY` environment variable wins, then the user-level
//! config file written by the `configure` subcommand.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

const CONFIG_DIR_NAME: &str = "code-smells";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Credentials persisted by the `configure` subcommand
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CredentialConfig {
    pub api_key: Option<String>,
}

impl CredentialConfig {
    /// Load credentials from a config file.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if the file exists and parses successfully
    /// - `Ok(None)` if the file does not exist
    /// - `Err(...)` if the file exists but fails to parse
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: CredentialConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(config))
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }
}

/// User-level config file location, e.g. `~/.config/code-smells/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolve the API key: environment first, then the config file.
///
/// An unreadable or malformed config file resolves to `None` here; the
/// caller reports the missing key, and `configure` rewrites the file.
pub fn resolve_api_key() -> Option<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
        if !key.is_empty() {
            return Some(key);
        }
    }

    let path = config_file_path()?;
    CredentialConfig::load(&path)
        .ok()
        .flatten()
        .and_then(|config| config.api_key)
}

/// Persist the API key to the user-level config file.
pub fn save_api_key(api_key: &str) -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config directory")?;
    save_api_key_to(&path, api_key)?;
    Ok(path)
}

fn save_api_key_to(path: &Path, api_key: &str) -> Result<()> {
    let config = CredentialConfig {
        api_key: Some(api_key.to_string()),
    };
    config.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let loaded = CredentialConfig::load(&dir.path().join("config.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        save_api_key_to(&path, "sk-ant-test-key").unwrap();

        let loaded = CredentialConfig::load(&path).unwrap().unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("sk-ant-test-key"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = [not valid").unwrap();

        assert!(CredentialConfig::load(&path).is_err());
    }
}
