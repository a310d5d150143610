use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::modules::error::{Error, Result};

/// Units of the rate-based protocol per 100 units of voltage.
pub const DEFAULT_CONVERSION_RATE_PERCENT: u32 = 360;

/// Switches for talking to foreign protocols. Read-only during distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteropConfig {
    pub foreign_receiver_enabled: bool,
    pub conversion_rate_percent: u32,
}

impl Default for InteropConfig {
    fn default() -> Self {
        Self {
            foreign_receiver_enabled: false,
            conversion_rate_percent: DEFAULT_CONVERSION_RATE_PERCENT,
        }
    }
}

impl InteropConfig {
    pub fn with_receivers(mut self, enabled: bool) -> Self {
        self.foreign_receiver_enabled = enabled;
        self
    }

    pub fn with_conversion_rate(mut self, percent: u32) -> Self {
        self.conversion_rate_percent = percent;
        self
    }
}

fn config_dir() -> PathBuf {
    PathBuf::from(".enet")
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Loads `.enet/config.json`, falling back to defaults when it is absent.
pub fn load_config() -> Result<InteropConfig> {
    load_config_from(&config_file_path())
}

pub fn load_config_from(path: &Path) -> Result<InteropConfig> {
    if !path.exists() {
        return Ok(InteropConfig::default());
    }

    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Ok(InteropConfig::default());
    }

    serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        hint: "delete it or run `enet config init` to reset",
        source,
    })
}

pub fn save_config(config: &InteropConfig) -> Result<()> {
    save_config_to(config, &config_file_path())
}

pub fn save_config_to(config: &InteropConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_vec_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, InteropConfig::default());
        assert!(!config.foreign_receiver_enabled);
        assert_eq!(config.conversion_rate_percent, DEFAULT_CONVERSION_RATE_PERCENT);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = InteropConfig::default()
            .with_receivers(true)
            .with_conversion_rate(250);

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"foreign_receiver_enabled": true}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert!(config.foreign_receiver_enabled);
        assert_eq!(config.conversion_rate_percent, DEFAULT_CONVERSION_RATE_PERCENT);
    }

    #[test]
    fn garbage_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("config.json"));
    }
}
